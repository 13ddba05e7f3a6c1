use num_bigint::BigInt;
use quickcheck::{Arbitrary, Gen};

use crate::{Array, Object, Value};

/// A finite `f64`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct JsonNumber(pub(crate) f64);

impl Arbitrary for JsonNumber {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut value = f64::arbitrary(g);
        while !value.is_finite() {
            value = f64::arbitrary(g);
        }
        Self(value)
    }
}

fn scalar(g: &mut Gen) -> Value {
    match usize::arbitrary(g) % 7 {
        0 => Value::Null,
        1 => Value::Boolean(bool::arbitrary(g)),
        2 => Value::Number(JsonNumber::arbitrary(g).0),
        // Small integers take the plain-integer writing path.
        3 => Value::from(i32::arbitrary(g)),
        // Normalized so literals `f64` holds exactly come back as numbers.
        4 => Value::from(BigInt::from(i128::arbitrary(g)) * BigInt::from(u64::arbitrary(g))),
        // Built directly, so it may hold an integer `f64` represents exactly.
        5 => Value::BigInt(BigInt::from(i64::arbitrary(g))),
        _ => Value::String(String::arbitrary(g)),
    }
}

fn gen_val(g: &mut Gen, depth: usize) -> Value {
    if depth == 0 {
        return scalar(g);
    }
    match usize::arbitrary(g) % 4 {
        0 => {
            let len = usize::arbitrary(g) % 14;
            (0..len).map(|_| gen_val(g, depth - 1)).collect::<Array>().into()
        }
        1 => {
            let len = usize::arbitrary(g) % 5;
            let mut object = Object::new();
            for _ in 0..len {
                object.insert(String::arbitrary(g), gen_val(g, depth - 1));
            }
            object.into()
        }
        _ => scalar(g),
    }
}

impl Arbitrary for Value {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = usize::arbitrary(g) % 4;
        gen_val(g, depth)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Value::Array(items) => Box::new(items.clone().into_iter()),
            Value::Object(object) => Box::new(
                object
                    .iter()
                    .map(|(_, v)| v.clone())
                    .collect::<Vec<_>>()
                    .into_iter(),
            ),
            _ => quickcheck::empty_shrinker(),
        }
    }
}
