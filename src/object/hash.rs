use super::{EvalError, Value};
use std::convert::TryFrom;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashKind {
    Int,
    Bool,
    Str,
}

/// Map key for a hashable value: its kind plus a 64-bit digest. Two keys of
/// different kinds never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub kind: HashKind,
    pub value: u64,
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

impl From<i64> for HashKey {
    fn from(n: i64) -> Self {
        Self {
            kind: HashKind::Int,
            value: n as u64,
        }
    }
}

impl From<bool> for HashKey {
    fn from(b: bool) -> Self {
        Self {
            kind: HashKind::Bool,
            value: b as u64,
        }
    }
}

impl From<&str> for HashKey {
    fn from(s: &str) -> Self {
        Self {
            kind: HashKind::Str,
            value: fnv1a(s.as_bytes()),
        }
    }
}

impl TryFrom<&Value> for HashKey {
    type Error = EvalError;

    fn try_from(value: &Value) -> std::result::Result<Self, Self::Error> {
        match value {
            Value::Int(n) => Ok((*n).into()),
            Value::Bool(b) => Ok((*b).into()),
            Value::Str(s) => Ok(s.as_str().into()),
            v => Err(EvalError::NotHashable {
                type_name: v.type_name(),
            }),
        }
    }
}
