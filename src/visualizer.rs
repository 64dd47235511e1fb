//! Graphviz rendering of a parsed program.

use crate::ast::{self, Expression, Node, Statement};
use std::io::{self, Write};

enum Tree<'a> {
    Statement(&'a Statement),
    Expression(&'a Expression),
    Identifier(&'a ast::Identifier),
    Conditional(&'a ast::Conditional),
    Block(&'a ast::BlockStatement),
}

impl<'a> Tree<'a> {
    fn label(&self) -> &'a str {
        match *self {
            Self::Statement(stmt) => stmt.token_literal(),
            Self::Expression(expr) => expr.token_literal(),
            Self::Identifier(ident) => ident.token_literal(),
            Self::Conditional(cond) => &cond.token.literal,
            Self::Block(block) => &block.token.literal,
        }
    }

    fn children(&self) -> Vec<Tree<'a>> {
        match *self {
            Self::Statement(stmt) => statement_children(stmt),
            Self::Expression(expr) => expression_children(expr),
            Self::Identifier(_) => vec![],
            Self::Conditional(cond) => vec![
                Tree::Expression(&cond.condition),
                Tree::Block(&cond.consequence),
            ],
            Self::Block(block) => block.statements.iter().map(Tree::Statement).collect(),
        }
    }
}

fn statement_children(stmt: &Statement) -> Vec<Tree> {
    match stmt {
        Statement::Yar(stmt) => vec![Tree::Identifier(&stmt.name), Tree::Expression(&stmt.value)],
        Statement::Gives(stmt) => stmt.value.iter().map(Tree::Expression).collect(),
        Statement::Port(stmt) => vec![Tree::Identifier(&stmt.name)],
        Statement::If(stmt) => {
            let mut children: Vec<Tree> = stmt.conditionals.iter().map(Tree::Conditional).collect();
            children.extend(stmt.alternate.iter().map(Tree::Block));
            children
        }
        Statement::For(stmt) => vec![Tree::Expression(&stmt.condition), Tree::Block(&stmt.body)],
        Statement::Break(_) => vec![],
        Statement::Chest(stmt) => std::iter::once(&stmt.name)
            .chain(stmt.fields.iter())
            .map(Tree::Identifier)
            .collect(),
        Statement::IndexAssign(stmt) => vec![
            Tree::Expression(&stmt.left),
            Tree::Expression(&stmt.index),
            Tree::Expression(&stmt.value),
        ],
        Statement::ChestFieldAssign(stmt) => vec![
            Tree::Expression(&stmt.left),
            Tree::Identifier(&stmt.field),
            Tree::Expression(&stmt.value),
        ],
        Statement::Expr(stmt) => vec![Tree::Expression(&stmt.expression)],
        Statement::Block(block) => block.statements.iter().map(Tree::Statement).collect(),
    }
}

fn named_children(fields: &[(ast::Identifier, Expression)]) -> Vec<Tree> {
    fields
        .iter()
        .flat_map(|(name, value)| vec![Tree::Identifier(name), Tree::Expression(value)])
        .collect()
}

fn expression_children(expr: &Expression) -> Vec<Tree> {
    match expr {
        Expression::Identifier(_)
        | Expression::IntegerLiteral(_)
        | Expression::StringLiteral(_)
        | Expression::Boolean(_) => vec![],
        Expression::Prefix(prefix) => vec![Tree::Expression(&prefix.right)],
        Expression::Infix(infix) => vec![
            Tree::Expression(&infix.left),
            Tree::Expression(&infix.right),
        ],
        Expression::Array(array) => array.elements.iter().map(Tree::Expression).collect(),
        Expression::HashMap(hash) => hash
            .pairs
            .iter()
            .flat_map(|(key, value)| vec![Tree::Expression(key), Tree::Expression(value)])
            .collect(),
        Expression::Index(index) => vec![
            Tree::Expression(&index.left),
            Tree::Expression(&index.index),
        ],
        Expression::Call(call) => std::iter::once(call.function.as_ref())
            .chain(call.arguments.iter())
            .map(Tree::Expression)
            .collect(),
        Expression::Function(func) => {
            let mut children: Vec<Tree> = func.parameters.iter().map(Tree::Identifier).collect();
            children.push(Tree::Block(&func.body));
            children
        }
        Expression::ChestLiteral(lit) => named_children(&lit.fields),
        Expression::ChestAccess(access) => vec![
            Tree::Expression(&access.left),
            Tree::Identifier(&access.field),
        ],
        Expression::ChestInstantiation(inst) => {
            let mut children = vec![Tree::Expression(&inst.chest)];
            children.extend(inst.arguments.iter().map(Tree::Expression));
            children.extend(named_children(&inst.named));
            children
        }
    }
}

struct DotWriter<W> {
    out: W,
    next_id: usize,
}

impl<W: Write> DotWriter<W> {
    fn node(&mut self, label: &str, parent: Option<&str>) -> io::Result<String> {
        self.next_id += 1;
        let id = format!("node{}", self.next_id);

        writeln!(self.out, "  {} [label={:?}];", id, label)?;
        if let Some(parent) = parent {
            writeln!(self.out, "  {} -> {};", parent, id)?;
        }

        Ok(id)
    }

    fn visit(&mut self, tree: &Tree, parent: &str) -> io::Result<()> {
        let id = self.node(tree.label(), Some(parent))?;

        for child in tree.children().iter() {
            self.visit(child, &id)?;
        }

        Ok(())
    }
}

/// Writes `program` as a Graphviz digraph, one box per AST node labelled with
/// its token literal.
pub fn write_dot(program: &ast::Program, out: impl Write) -> io::Result<()> {
    let mut writer = DotWriter { out, next_id: 0 };

    writeln!(writer.out, "digraph AST {{")?;
    writeln!(writer.out, "  node [shape=box];")?;

    let root = writer.node("Program", None)?;
    for stmt in program.statements.iter() {
        writer.visit(&Tree::Statement(stmt), &root)?;
    }

    writeln!(writer.out, "}}")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;
    use pretty_assertions::assert_eq;

    fn render(input: &str) -> String {
        let program = Parser::new(Lexer::new(input)).parse_program().unwrap();
        let mut out = Vec::new();
        write_dot(&program, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_write_dot() {
        let expected = r#"digraph AST {
  node [shape=box];
  node1 [label="Program"];
  node2 [label="yar"];
  node1 -> node2;
  node3 [label="x"];
  node2 -> node3;
  node4 [label="+"];
  node2 -> node4;
  node5 [label="1"];
  node4 -> node5;
  node6 [label="2"];
  node4 -> node6;
}
"#;

        assert_eq!(render("yar x be 1 + 2."), expected);
    }

    #[test]
    fn test_labels_are_quoted() {
        let dot = render("ahoy('say \"hi\"').");

        assert!(dot.contains(r#"[label="say \"hi\""]"#), "{}", dot);
        assert!(dot.contains(r#"[label="ahoy"]"#), "{}", dot);
    }

    #[test]
    fn test_nested_blocks() {
        let dot = render("if ay: 4 nay: break.. ls: 1..");
        let labels: Vec<&str> = dot
            .lines()
            .filter_map(|line| line.split("[label=").nth(1))
            .collect();

        assert_eq!(
            labels,
            vec![
                "\"Program\"];",
                "\"if\"];",
                "\"if\"];",
                "\"ay\"];",
                "\"4\"];",
                "\"4\"];",
                "\"nay\"];",
                "\"break\"];",
                "\"break\"];",
                "\"1\"];",
                "\"1\"];",
                "\"1\"];",
            ]
        );
    }
}
