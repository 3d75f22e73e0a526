use super::BasicEdit;

/// Something that can be moved along with the tree, when the tree gets edited.
/// Used to keep carets valid.
pub trait Editable {
    fn apply_edit(&mut self, edit: &BasicEdit);

    fn apply_edits(&mut self, edits: &[BasicEdit]) {
        for edit in edits {
            self.apply_edit(edit);
        }
    }
}
