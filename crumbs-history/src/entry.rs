/// A state together with the value associated to it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry<S, V> {
    pub state: S,
    pub value: Option<V>,
}

impl<S, V> Entry<S, V> {
    pub fn new(state: S, value: Option<V>) -> Self {
        Self { state, value }
    }
}

impl<S, V> From<(S, V)> for Entry<S, V> {
    fn from((state, value): (S, V)) -> Self {
        Self {
            state,
            value: Some(value),
        }
    }
}
