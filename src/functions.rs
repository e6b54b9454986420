//! src/functions.rs

/// Sink for the `(key, value)` pairs produced by a [`Mapper`].
pub trait MapEmitter<K, V> {
    fn emit(&mut self, key: K, value: V);
}

/// Sink for the outputs produced by a [`Reducer`].
pub trait ReduceEmitter<O> {
    fn emit(&mut self, output: O);
}

/// Turns one input line into zero or more `(key, value)` pairs.
///
/// An `Err` rejects that single line only; the caller logs it and moves on.
pub trait Mapper {
    type Key;
    type Value;
    type Error: std::error::Error;

    fn map<E>(&self, line_number: u64, line: &str, emitter: &mut E) -> Result<(), Self::Error>
    where
        E: MapEmitter<Self::Key, Self::Value>;
}

/// Folds every value observed for one key.
pub trait Reducer {
    type Key;
    type Value;
    type Output;

    fn reduce<I, E>(&self, key: &Self::Key, values: I, emitter: &mut E)
    where
        I: Iterator<Item = Self::Value>,
        E: ReduceEmitter<Self::Output>;
}

impl<K, V> MapEmitter<K, V> for Vec<(K, V)> {
    fn emit(&mut self, key: K, value: V) {
        self.push((key, value));
    }
}

impl<O> ReduceEmitter<O> for Vec<O> {
    fn emit(&mut self, output: O) {
        self.push(output);
    }
}
