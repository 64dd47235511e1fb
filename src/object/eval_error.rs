use crate::ast;
use custom_error::custom_error;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub EvalError

    IdentifierNotFound{id: String} = "Identifier not found: {id}",
    UnknownPrefixOperator{operator: ast::Operator, operand: &'static str} = "unknown operator: {operator}{operand}",
    UnsupportedNegation{operand: &'static str} = "Unsupported operation !{operand}",
    UnknownInfixOperator{left: &'static str, operator: ast::Operator, right: &'static str} = "unknown operator: {left} {operator} {right}",
    TypeMismatch{left: &'static str, operator: ast::Operator, right: &'static str} = "type mismatch: {left} {operator} {right}",
    DivisionByZero = "division by zero",
    NotAFunction{type_name: &'static str} = "Not a function: {type_name}",
    UnsupportedArgType{fn_name: &'static str, type_name: &'static str} = "argument to `{fn_name}` not supported, got {type_name}",
    WrongArgType{ordinal: &'static str, fn_name: &'static str, expected: &'static str, got: &'static str} = "{ordinal}argument to `{fn_name}` must be {expected}, got {got}",
    IncorrectArity{got: usize, want: usize} = "wrong number of args. got={got}, expected={want}",
    WrongArgCount{got: usize, want: usize} = "wrong number of arguments. got={got}, expected={want}",
    NotIndexable{type_name: &'static str} = "index operator not supported: {type_name}",
    NotHashable{type_name: &'static str} = "Object not hashable. Type={type_name}",
    IndexOutOfBounds{len: usize, index: i64} = "index out of bounds. len={len}, index={index}",
    InsertOutOfBounds{index: i64, len: usize} = "index out of bound. index={index}, len={len}",
    NonBooleanCondition{type_name: &'static str} = "4 statement condition is not boolean. Got type={type_name}",
    PortNotImplemented = "Port statement not implemented yet.",
    NotAChestType{type_name: &'static str} = "Not a chest type: {type_name}",
    TooManyChestArgs{got: usize, want: usize} = "too many arguments for chest. got={got}, fields={want}",
    UnknownChestField{field: String} = "unknown chest field: {field}",
    FieldAccessNotSupported{type_name: &'static str} = "field access not supported: {type_name}",
}

impl EvalError {
    pub fn binary_op_error(
        left: &'static str,
        operator: ast::Operator,
        right: &'static str,
    ) -> Self {
        if left == right {
            Self::UnknownInfixOperator {
                left,
                operator,
                right,
            }
        } else {
            Self::TypeMismatch {
                left,
                operator,
                right,
            }
        }
    }

    /// Argument kind error for builtins taking a single argument.
    pub fn arg_type(fn_name: &'static str, expected: &'static str, got: &'static str) -> Self {
        Self::WrongArgType {
            ordinal: "",
            fn_name,
            expected,
            got,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_messages() {
        let cases = vec![
            (
                EvalError::binary_op_error("INT", ast::Operator::Plus, "BOOL"),
                "type mismatch: INT + BOOL",
            ),
            (
                EvalError::binary_op_error("BOOL", ast::Operator::Plus, "BOOL"),
                "unknown operator: BOOL + BOOL",
            ),
            (
                EvalError::UnknownPrefixOperator {
                    operator: ast::Operator::Minus,
                    operand: "BOOL",
                },
                "unknown operator: -BOOL",
            ),
            (
                EvalError::arg_type("peek", "ARRAY", "INT"),
                "argument to `peek` must be ARRAY, got INT",
            ),
            (
                EvalError::WrongArgType {
                    ordinal: "second ",
                    fn_name: "insert",
                    expected: "INT",
                    got: "STRING",
                },
                "second argument to `insert` must be INT, got STRING",
            ),
            (
                EvalError::IndexOutOfBounds { len: 3, index: 4 },
                "index out of bounds. len=3, index=4",
            ),
        ];

        for (err, expected) in cases.into_iter() {
            assert_eq!(err.to_string(), expected);
        }
    }
}
