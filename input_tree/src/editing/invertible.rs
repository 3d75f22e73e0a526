/// An operation that can be undone.
/// Law: `x.inverse().inverse() == x`
pub trait Invertible {
    type Inverse: Invertible;
    fn inverse(&self) -> Self::Inverse;
}

impl<T: Invertible<Inverse = T> + Clone> Invertible for Vec<T> {
    type Inverse = Vec<T>;

    /// Inverts every edit and reverses their order
    fn inverse(&self) -> Self::Inverse {
        self.iter().rev().map(|edit| edit.inverse()).collect()
    }
}
