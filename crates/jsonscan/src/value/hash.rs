//! `Hash` consistent with `PartialEq`: objects hash independently of key
//! order, and integral numbers hash alike whether held as `Number` or `BigInt`.

use core::hash::{Hash, Hasher};
use std::hash::DefaultHasher;

use num_bigint::BigInt;

use super::{Object, Value, exact_integer};

fn hash_integer<H: Hasher>(n: &BigInt, state: &mut H) {
    state.write_u8(3);
    n.hash(state);
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Null => state.write_u8(0),
            Value::Boolean(b) => {
                state.write_u8(1);
                b.hash(state);
            }
            Value::Number(n) => match exact_integer(*n) {
                Some(int) => hash_integer(&int, state),
                None => {
                    state.write_u8(2);
                    n.to_bits().hash(state);
                }
            },
            Value::BigInt(n) => hash_integer(n, state),
            Value::String(s) => {
                state.write_u8(4);
                s.hash(state);
            }
            Value::Array(a) => {
                state.write_u8(5);
                a.hash(state);
            }
            Value::Object(o) => {
                state.write_u8(6);
                o.hash(state);
            }
        }
    }
}

impl Hash for Object {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut combined = 0u64;
        for (key, value) in self {
            let mut entry = DefaultHasher::new();
            key.hash(&mut entry);
            value.hash(&mut entry);
            combined = combined.wrapping_add(entry.finish());
        }
        state.write_usize(self.len());
        state.write_u64(combined);
    }
}
