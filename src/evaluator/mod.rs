use crate::ast::{self, Expression, Node, Statement};
use crate::builtins;
use crate::namespace::Namespace;
use crate::object::*;
use crate::stack::ensure_sufficient_stack;
use std::convert::TryFrom;
use std::rc::Rc;
use tracing::{debug, trace};


/// Evaluates a program against `namespace`. A runtime error stops the program
/// and becomes its value.
pub fn eval(program: &ast::Program, namespace: &Namespace) -> Value {
    let mut evaluator = Evaluator::default();

    match evaluator.eval_program(program, namespace) {
        Ok(value) => value,
        Err(error) => {
            debug!(line = evaluator.line, %error, "program stopped on runtime error");
            Value::Error(ErrorValue {
                error,
                line: evaluator.line,
            })
        }
    }
}

#[derive(Default)]
struct Evaluator {
    /// Line of the innermost statement under evaluation.
    line: usize,
}

impl Evaluator {
    fn eval_program(&mut self, program: &ast::Program, namespace: &Namespace) -> Result<Value> {
        let mut result = Value::EMPTY;

        for stmt in program.statements.iter() {
            match self.eval_statement(stmt, namespace)? {
                Value::GivesValue(value) => return Ok(*value),
                Value::Break => return Ok(Value::EMPTY),
                value => result = value,
            }
        }

        Ok(result)
    }

    /// Stops at the first `gives` or `break` and hands it to the enclosing
    /// construct unchanged.
    fn eval_block_statement(
        &mut self,
        block: &ast::BlockStatement,
        namespace: &Namespace,
    ) -> Result<Value> {
        let mut result = Value::EMPTY;

        for stmt in block.statements.iter() {
            result = self.eval_statement(stmt, namespace)?;

            if result.is_gives_value() || result == Value::BREAK {
                return Ok(result);
            }
        }

        Ok(result)
    }

    fn eval_statement(&mut self, stmt: &Statement, namespace: &Namespace) -> Result<Value> {
        ensure_sufficient_stack(|| self.eval_statement_inner(stmt, namespace))
    }

    fn eval_statement_inner(&mut self, stmt: &Statement, namespace: &Namespace) -> Result<Value> {
        let outer_line = self.line;
        self.line = stmt.token().line;

        let value = match stmt {
            Statement::Yar(stmt) => {
                let value = self.eval_expression(&stmt.value, namespace)?;
                namespace.set(&stmt.name.value, value);
                Value::EMPTY
            }
            Statement::Gives(stmt) => {
                let value = match &stmt.value {
                    Some(expr) => self.eval_expression(expr, namespace)?,
                    None => Value::EMPTY,
                };
                Value::GivesValue(Box::new(value))
            }
            Statement::Port(_) => return Err(EvalError::PortNotImplemented),
            Statement::If(stmt) => self.eval_if_statement(stmt, namespace)?,
            Statement::For(stmt) => self.eval_for_statement(stmt, namespace)?,
            Statement::Break(_) => Value::BREAK,
            Statement::Chest(stmt) => {
                let chest_type = ChestType {
                    name: stmt.name.value.clone(),
                    fields: stmt.fields.iter().map(|f| f.value.clone()).collect(),
                };
                namespace.set(&stmt.name.value, Value::ChestType(chest_type));
                Value::EMPTY
            }
            Statement::IndexAssign(stmt) => self.eval_index_assignment(stmt, namespace)?,
            Statement::ChestFieldAssign(stmt) => {
                self.eval_chest_field_assignment(stmt, namespace)?
            }
            Statement::Expr(stmt) => self.eval_expression(&stmt.expression, namespace)?,
            Statement::Block(block) => self.eval_block_statement(block, namespace)?,
        };

        self.line = outer_line;
        Ok(value)
    }

    fn eval_if_statement(&mut self, stmt: &ast::IfStatement, namespace: &Namespace) -> Result<Value> {
        for conditional in stmt.conditionals.iter() {
            if self.eval_expression(&conditional.condition, namespace)? == Value::TRUE {
                return self.eval_block_statement(&conditional.consequence, namespace);
            }
        }

        match &stmt.alternate {
            Some(alternate) => self.eval_block_statement(alternate, namespace),
            None => Ok(Value::EMPTY),
        }
    }

    fn eval_for_statement(
        &mut self,
        stmt: &ast::ForStatement,
        namespace: &Namespace,
    ) -> Result<Value> {
        loop {
            match self.eval_expression(&stmt.condition, namespace)? {
                Value::Bool(true) => {}
                Value::Bool(false) => break,
                v => {
                    return Err(EvalError::NonBooleanCondition {
                        type_name: v.type_name(),
                    })
                }
            }

            match self.eval_block_statement(&stmt.body, namespace)? {
                Value::Break => break,
                result if result.is_gives_value() => return Ok(result),
                _ => {}
            }
        }

        Ok(Value::EMPTY)
    }

    fn eval_index_assignment(
        &mut self,
        stmt: &ast::IndexAssignment,
        namespace: &Namespace,
    ) -> Result<Value> {
        let left = self.eval_expression(&stmt.left, namespace)?;
        let index = self.eval_expression(&stmt.index, namespace)?;
        let value = self.eval_expression(&stmt.value, namespace)?;

        match (&left, &index) {
            (Value::Array(elements), Value::Int(i)) => {
                let mut elements = elements.borrow_mut();
                let slot = array_slot(elements.len(), *i)?;
                elements[slot] = value;
            }
            (Value::HashMap(hash), _) => {
                let key = HashKey::try_from(&index)?;
                hash.borrow_mut().values.insert(key, (index.clone(), value));
            }
            _ => {
                return Err(EvalError::NotIndexable {
                    type_name: left.type_name(),
                })
            }
        }

        Ok(Value::EMPTY)
    }

    fn eval_chest_field_assignment(
        &mut self,
        stmt: &ast::ChestFieldAssignment,
        namespace: &Namespace,
    ) -> Result<Value> {
        let left = self.eval_expression(&stmt.left, namespace)?;
        let value = self.eval_expression(&stmt.value, namespace)?;

        match &left {
            Value::Chest(chest) => match chest.borrow_mut().get_mut(&stmt.field.value) {
                Some(slot) => *slot = value,
                None => {
                    return Err(EvalError::UnknownChestField {
                        field: stmt.field.value.clone(),
                    })
                }
            },
            v => {
                return Err(EvalError::FieldAccessNotSupported {
                    type_name: v.type_name(),
                })
            }
        }

        Ok(Value::EMPTY)
    }

    fn eval_expression(&mut self, expr: &Expression, namespace: &Namespace) -> Result<Value> {
        ensure_sufficient_stack(|| self.eval_expression_inner(expr, namespace))
    }

    fn eval_expression_inner(&mut self, expr: &Expression, namespace: &Namespace) -> Result<Value> {
        match expr {
            Expression::Identifier(ident) => eval_identifier(ident, namespace),
            Expression::IntegerLiteral(lit) => Ok(Value::Int(lit.value)),
            Expression::StringLiteral(lit) => Ok(Value::Str(lit.value.clone())),
            Expression::Boolean(b) => Ok(b.value.into()),
            Expression::Prefix(prefix) => {
                let right = self.eval_expression(&prefix.right, namespace)?;
                eval_prefix_expression(prefix.operator, right)
            }
            Expression::Infix(infix) => {
                let left = self.eval_expression(&infix.left, namespace)?;
                let right = self.eval_expression(&infix.right, namespace)?;
                eval_infix_expression(infix.operator, left, right)
            }
            Expression::Array(array) => {
                let elements = self.eval_expressions(&array.elements, namespace)?;
                Ok(elements.into())
            }
            Expression::HashMap(hash) => self.eval_hash_literal(hash, namespace),
            Expression::Index(index) => {
                let left = self.eval_expression(&index.left, namespace)?;
                let index = self.eval_expression(&index.index, namespace)?;
                eval_index_expression(left, index)
            }
            Expression::Call(call) => {
                let function = self.eval_expression(&call.function, namespace)?;
                let args = self.eval_expressions(&call.arguments, namespace)?;
                self.apply_function(function, args)
            }
            Expression::Function(func) => Ok(Value::Function(FunctionValue {
                parameters: func.parameters.clone(),
                body: Rc::clone(&func.body),
                namespace: namespace.clone(),
            })),
            Expression::ChestLiteral(lit) => {
                let fields = self.eval_named_fields(&lit.fields, namespace)?;
                Ok(ChestValue { fields }.into())
            }
            Expression::ChestAccess(access) => {
                let left = self.eval_expression(&access.left, namespace)?;
                eval_chest_access(left, &access.field.value)
            }
            Expression::ChestInstantiation(inst) => self.eval_chest_instantiation(inst, namespace),
        }
    }

    /// Left to right, stopping at the first error.
    fn eval_expressions(
        &mut self,
        exprs: &[Expression],
        namespace: &Namespace,
    ) -> Result<Vec<Value>> {
        exprs
            .iter()
            .map(|expr| self.eval_expression(expr, namespace))
            .collect()
    }

    fn eval_named_fields(
        &mut self,
        fields: &[(ast::Identifier, Expression)],
        namespace: &Namespace,
    ) -> Result<Vec<(String, Value)>> {
        let mut values = Vec::with_capacity(fields.len());
        for (name, expr) in fields.iter() {
            values.push((name.value.clone(), self.eval_expression(expr, namespace)?));
        }
        Ok(values)
    }

    fn eval_hash_literal(
        &mut self,
        hash: &ast::HashMapLiteral,
        namespace: &Namespace,
    ) -> Result<Value> {
        let mut values = HashValue::default();

        for (key_expr, value_expr) in hash.pairs.iter() {
            let key = self.eval_expression(key_expr, namespace)?;
            let hash_key = HashKey::try_from(&key)?;
            let value = self.eval_expression(value_expr, namespace)?;

            values.values.insert(hash_key, (key, value));
        }

        Ok(values.into())
    }

    fn apply_function(&mut self, function: Value, args: Vec<Value>) -> Result<Value> {
        ensure_sufficient_stack(|| self.apply_function_inner(function, args))
    }

    fn apply_function_inner(&mut self, function: Value, args: Vec<Value>) -> Result<Value> {
        match function {
            Value::Function(func) => {
                trace!(
                    arity = func.parameters.len(),
                    args = args.len(),
                    "calling function"
                );

                let namespace = Namespace::enclosed(&func.namespace);
                let mut args = args.into_iter();
                for param in func.parameters.iter() {
                    namespace.set(&param.value, args.next().unwrap_or(Value::EMPTY));
                }

                match self.eval_block_statement(&func.body, &namespace)? {
                    Value::GivesValue(value) => Ok(*value),
                    Value::Break => Ok(Value::EMPTY),
                    value => Ok(value),
                }
            }
            Value::Builtin(builtin) => (builtin.func)(args),
            v => Err(EvalError::NotAFunction {
                type_name: v.type_name(),
            }),
        }
    }

    fn eval_chest_instantiation(
        &mut self,
        inst: &ast::ChestInstantiation,
        namespace: &Namespace,
    ) -> Result<Value> {
        let chest_type = match self.eval_expression(&inst.chest, namespace)? {
            Value::ChestType(chest_type) => chest_type,
            v => {
                return Err(EvalError::NotAChestType {
                    type_name: v.type_name(),
                })
            }
        };

        let mut chest = ChestValue {
            fields: chest_type
                .fields
                .iter()
                .map(|name| (name.clone(), Value::EMPTY))
                .collect(),
        };

        if inst.named.is_empty() {
            let args = self.eval_expressions(&inst.arguments, namespace)?;
            if args.len() > chest.fields.len() {
                return Err(EvalError::TooManyChestArgs {
                    got: args.len(),
                    want: chest.fields.len(),
                });
            }

            for ((_, slot), arg) in chest.fields.iter_mut().zip(args) {
                *slot = arg;
            }
        } else {
            for (name, value) in self.eval_named_fields(&inst.named, namespace)? {
                match chest.get_mut(&name) {
                    Some(slot) => *slot = value,
                    None => return Err(EvalError::UnknownChestField { field: name }),
                }
            }
        }

        Ok(chest.into())
    }
}

fn eval_identifier(ident: &ast::Identifier, namespace: &Namespace) -> Result<Value> {
    namespace
        .get(&ident.value)
        .or_else(|| builtins::lookup(&ident.value))
        .ok_or_else(|| EvalError::IdentifierNotFound {
            id: ident.value.clone(),
        })
}

fn eval_prefix_expression(operator: ast::Operator, right: Value) -> Result<Value> {
    match (operator, right) {
        (ast::Operator::Minus, Value::Int(n)) => Ok(Value::Int(n.wrapping_neg())),
        (ast::Operator::Bang, Value::Bool(b)) => Ok((!b).into()),
        (ast::Operator::Bang, right) => Err(EvalError::UnsupportedNegation {
            operand: right.type_name(),
        }),
        (operator, right) => Err(EvalError::UnknownPrefixOperator {
            operator,
            operand: right.type_name(),
        }),
    }
}

fn eval_infix_expression(operator: ast::Operator, left: Value, right: Value) -> Result<Value> {
    match (left, right) {
        (Value::Int(x), Value::Int(y)) => eval_integer_infix_expression(operator, x, y),
        (Value::Bool(x), Value::Bool(y)) => eval_boolean_infix_expression(operator, x, y),
        (Value::Str(x), Value::Str(y)) => eval_string_infix_expression(operator, &x, &y),
        (Value::Int(x), Value::Str(y)) => eval_string_infix_expression(operator, &x.to_string(), &y),
        (Value::Str(x), Value::Int(y)) => eval_string_infix_expression(operator, &x, &y.to_string()),
        (left, right) => {
            if left.type_name() == right.type_name() {
                if let Some(equal) = compare(operator, left.is_same(&right)) {
                    return Ok(equal.into());
                }
            }
            Err(EvalError::binary_op_error(
                left.type_name(),
                operator,
                right.type_name(),
            ))
        }
    }
}

/// Applies an equality operator to the outcome of a comparison, or returns
/// `None` when `operator` is not an equality operator.
fn compare(operator: ast::Operator, equal: bool) -> Option<bool> {
    match operator {
        ast::Operator::Eq => Some(equal),
        ast::Operator::NotEq | ast::Operator::BangEq => Some(!equal),
        _ => None,
    }
}

fn eval_integer_infix_expression(operator: ast::Operator, left: i64, right: i64) -> Result<Value> {
    Ok(match operator {
        ast::Operator::Plus => Value::Int(left.wrapping_add(right)),
        ast::Operator::Minus => Value::Int(left.wrapping_sub(right)),
        ast::Operator::Asterisk => Value::Int(left.wrapping_mul(right)),
        ast::Operator::Slash | ast::Operator::Mod if right == 0 => {
            return Err(EvalError::DivisionByZero)
        }
        ast::Operator::Slash => Value::Int(left.wrapping_div(right)),
        ast::Operator::Mod => Value::Int(left.wrapping_rem(right)),
        ast::Operator::LT => (left < right).into(),
        ast::Operator::GT => (left > right).into(),
        ast::Operator::LTEq => (left <= right).into(),
        ast::Operator::GTEq => (left >= right).into(),
        op => match compare(op, left == right) {
            Some(equal) => equal.into(),
            None => return Err(EvalError::binary_op_error("INT", op, "INT")),
        },
    })
}

fn eval_boolean_infix_expression(operator: ast::Operator, left: bool, right: bool) -> Result<Value> {
    match operator {
        ast::Operator::And => Ok((left && right).into()),
        ast::Operator::Or => Ok((left || right).into()),
        op => compare(op, left == right)
            .map(Value::from)
            .ok_or_else(|| EvalError::binary_op_error("BOOL", op, "BOOL")),
    }
}

fn eval_string_infix_expression(operator: ast::Operator, left: &str, right: &str) -> Result<Value> {
    match operator {
        ast::Operator::Plus => Ok(Value::Str(format!("{}{}", left, right))),
        op => compare(op, left == right)
            .map(Value::from)
            .ok_or_else(|| EvalError::binary_op_error("STRING", op, "STRING")),
    }
}

fn eval_index_expression(left: Value, index: Value) -> Result<Value> {
    match (&left, &index) {
        (Value::Array(elements), Value::Int(i)) => {
            let elements = elements.borrow();
            let slot = array_slot(elements.len(), *i)?;
            Ok(elements[slot].clone())
        }
        (Value::HashMap(hash), _) => {
            let key = HashKey::try_from(&index)?;
            Ok(hash
                .borrow()
                .values
                .get(&key)
                .map(|(_, value)| value.clone())
                .unwrap_or(Value::EMPTY))
        }
        _ => Err(EvalError::NotIndexable {
            type_name: left.type_name(),
        }),
    }
}

fn array_slot(len: usize, index: i64) -> Result<usize> {
    if index < 0 || index >= len as i64 {
        Err(EvalError::IndexOutOfBounds { len, index })
    } else {
        Ok(index as usize)
    }
}

fn eval_chest_access(left: Value, field: &str) -> Result<Value> {
    match &left {
        Value::Chest(chest) => chest
            .borrow()
            .get(field)
            .cloned()
            .ok_or_else(|| EvalError::UnknownChestField {
                field: field.to_owned(),
            }),
        v => Err(EvalError::FieldAccessNotSupported {
            type_name: v.type_name(),
        }),
    }
}
