use super::*;
use crate::ast::Node;
use crate::lexer::Lexer;
use pretty_assertions::assert_eq;

#[test]
fn test_yar_statements() {
    let cases = vec![
        ("yar x be 5.", "x", "5"),
        ("yar y be ay.", "y", "ay"),
        ("yar foobar be y", "foobar", "y"),
        ("yar total be 1 + 2 * 3.", "total", "(1 + (2 * 3))"),
    ];

    for (input, name, value) in cases.into_iter() {
        let program = parse(input);
        assert_eq!(program.statements.len(), 1, "{}", input);

        match &program.statements[0] {
            Statement::Yar(stmt) => {
                assert_eq!(stmt.token.literal, "yar");
                assert_eq!(stmt.name.value, name);
                assert_eq!(stmt.name.token_literal(), name);
                assert_eq!(stmt.value.to_string(), value);
            }
            stmt => panic!("expected yar statement, got {:?}", stmt),
        }
    }
}

#[test]
fn test_implicit_yar() {
    let program = parse("x be x + 1.");

    match &program.statements[0] {
        Statement::Yar(stmt) => {
            assert_eq!(stmt.token.literal, ast::IMPLICIT_YAR);
            assert_eq!(stmt.name.value, "x");
            assert_eq!(stmt.value.to_string(), "(x + 1)");
        }
        stmt => panic!("expected yar statement, got {:?}", stmt),
    }
    assert_eq!(program.to_string(), "x be (x + 1).");
}

#[test]
fn test_gives_statements() {
    let program = parse("gives 5. gives ay. gives. gives x + y");
    let values: Vec<Option<String>> = program
        .statements
        .iter()
        .map(|stmt| match stmt {
            Statement::Gives(stmt) => {
                assert_eq!(stmt.token.literal, "gives");
                stmt.value.as_ref().map(Expression::to_string)
            }
            stmt => panic!("expected gives statement, got {:?}", stmt),
        })
        .collect();

    assert_eq!(
        values,
        vec![
            Some("5".to_owned()),
            Some("ay".to_owned()),
            None,
            Some("(x + y)".to_owned()),
        ]
    );
}

#[test]
fn test_port_and_break_statements() {
    let program = parse("port treasure. break. break");

    assert_eq!(program.statements.len(), 3);
    match &program.statements[0] {
        Statement::Port(stmt) => assert_eq!(stmt.name.value, "treasure"),
        stmt => panic!("expected port statement, got {:?}", stmt),
    }
    assert!(matches!(program.statements[1], Statement::Break(_)));
    assert!(matches!(program.statements[2], Statement::Break(_)));
}

#[test]
fn test_identifier_expression() {
    match single_expression("foobar.") {
        Expression::Identifier(ident) => {
            assert_eq!(ident.value, "foobar");
            assert_eq!(ident.token_literal(), "foobar");
        }
        expr => panic!("expected identifier, got {:?}", expr),
    }
}

#[test]
fn test_integer_literals() {
    let cases = vec![("5.", 5), ("yar n be 404.", 404), ("yar n be 14.", 14), ("-44", 44)];

    for (input, expected) in cases.into_iter() {
        let program = parse(input);
        let expr = match &program.statements[0] {
            Statement::Yar(stmt) => stmt.value.clone(),
            Statement::Expr(stmt) => match &stmt.expression {
                Expression::Prefix(prefix) => (*prefix.right).clone(),
                expr => expr.clone(),
            },
            stmt => panic!("unexpected statement {:?}", stmt),
        };

        match expr {
            Expression::IntegerLiteral(lit) => {
                assert_eq!(lit.value, expected, "{}", input);
                assert_eq!(lit.token.literal, expected.to_string());
            }
            expr => panic!("expected integer literal, got {:?}", expr),
        }
    }
}

#[test]
fn test_separated_fours_stay_apart() {
    let program = parse("yar n be 4 1.");

    assert_eq!(program.statements.len(), 2);
    assert_eq!(program.statements[0].to_string(), "yar n be 4.");
    assert_eq!(program.statements[1].to_string(), "1");
}

#[test]
fn test_string_and_boolean_literals() {
    match single_expression("\"hello world\".") {
        Expression::StringLiteral(lit) => assert_eq!(lit.value, "hello world"),
        expr => panic!("expected string literal, got {:?}", expr),
    }

    match single_expression("'single'") {
        Expression::StringLiteral(lit) => assert_eq!(lit.value, "single"),
        expr => panic!("expected string literal, got {:?}", expr),
    }

    let cases = vec![("ay.", true), ("nay.", false)];
    for (input, expected) in cases.into_iter() {
        match single_expression(input) {
            Expression::Boolean(b) => assert_eq!(b.value, expected),
            expr => panic!("expected boolean, got {:?}", expr),
        }
    }
}

#[test]
fn test_prefix_expressions() {
    let cases = vec![
        ("!5.", ast::Operator::Bang, "5"),
        ("-15.", ast::Operator::Minus, "15"),
        ("!ay.", ast::Operator::Bang, "ay"),
        ("!nay.", ast::Operator::Bang, "nay"),
    ];

    for (input, operator, right) in cases.into_iter() {
        match single_expression(input) {
            Expression::Prefix(prefix) => {
                assert_eq!(prefix.operator, operator);
                assert_eq!(prefix.right.to_string(), right);
            }
            expr => panic!("expected prefix expression, got {:?}", expr),
        }
    }
}

#[test]
fn test_infix_expressions() {
    let cases = vec![
        ("5 + 5.", "5", ast::Operator::Plus, "5"),
        ("5 - 5.", "5", ast::Operator::Minus, "5"),
        ("5 * 5.", "5", ast::Operator::Asterisk, "5"),
        ("5 / 5.", "5", ast::Operator::Slash, "5"),
        ("5 mod 5.", "5", ast::Operator::Mod, "5"),
        ("5 > 5.", "5", ast::Operator::GT, "5"),
        ("5 < 5.", "5", ast::Operator::LT, "5"),
        ("5 >= 5.", "5", ast::Operator::GTEq, "5"),
        ("5 <= 5.", "5", ast::Operator::LTEq, "5"),
        ("5 = 5.", "5", ast::Operator::Eq, "5"),
        ("5 <> 5.", "5", ast::Operator::NotEq, "5"),
        ("5 != 5.", "5", ast::Operator::BangEq, "5"),
        ("ay and nay.", "ay", ast::Operator::And, "nay"),
        ("ay or nay.", "ay", ast::Operator::Or, "nay"),
    ];

    for (input, left, operator, right) in cases.into_iter() {
        match single_expression(input) {
            Expression::Infix(infix) => {
                assert_eq!(infix.left.to_string(), left, "{}", input);
                assert_eq!(infix.operator, operator, "{}", input);
                assert_eq!(infix.right.to_string(), right, "{}", input);
            }
            expr => panic!("expected infix expression, got {:?}", expr),
        }
    }
}

#[test]
fn test_operator_precedence_parsing() {
    let cases = vec![
        ("-a * b", "((-a) * b)"),
        ("!-a", "(!(-a))"),
        ("a + b + c", "((a + b) + c)"),
        ("a + b - c", "((a + b) - c)"),
        ("a * b * c", "((a * b) * c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b / c", "(a + (b / c))"),
        ("a mod b + c", "((a mod b) + c)"),
        ("a + b * c + d / e - g", "(((a + (b * c)) + (d / e)) - g)"),
        ("3 + 4. -5 * 5", "(3 + 4)((-5) * 5)"),
        ("5 > 4 = 3 < 4", "((5 > 4) = (3 < 4))"),
        ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
        ("5 <= 4 <> 3 >= 4", "((5 <= 4) <> (3 >= 4))"),
        ("3 + 4 * 5 = 3 * 1 + 4 * 5", "((3 + (4 * 5)) = ((3 * 1) + (4 * 5)))"),
        ("ay", "ay"),
        ("nay", "nay"),
        ("3 > 5 = nay", "((3 > 5) = nay)"),
        ("3 < 5 = ay", "((3 < 5) = ay)"),
        ("a or b and c", "(a or (b and c))"),
        ("a = b and c <> d or e", "(((a = b) and (c <> d)) or e)"),
        ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2", "((5 + 5) * 2)"),
        ("2 / (5 + 5)", "(2 / (5 + 5))"),
        ("-(5 + 5)", "(-(5 + 5))"),
        ("!(ay = ay)", "(!(ay = ay))"),
        ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
        (
            "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
            "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
        ),
        ("add(a + b + c * d / h + g)", "add((((a + b) + ((c * d) / h)) + g))"),
        ("a * [1, 2, 3, 4][b * c] * d", "((a * ([1, 2, 3, 4][(b * c)])) * d)"),
        (
            "add(a * b[2], b[1], 2 * [1, 2][1])",
            "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))",
        ),
        ("p|x + p|y * 2", "(p|x + (p|y * 2))"),
        ("-p|x", "(-p|x)"),
    ];

    for (input, expected) in cases.into_iter() {
        assert_eq!(parse(input).to_string(), expected, "{}", input);
    }
}

#[test]
fn test_if_statement() {
    let program = parse("if x < y: x.");
    assert_eq!(program.statements.len(), 1);

    match &program.statements[0] {
        Statement::If(stmt) => {
            assert_eq!(stmt.conditionals.len(), 1);
            let conditional = &stmt.conditionals[0];
            assert_eq!(conditional.token.literal, "if");
            assert_eq!(conditional.condition.to_string(), "(x < y)");
            assert_eq!(conditional.consequence.statements.len(), 1);
            assert_eq!(conditional.consequence.statements[0].to_string(), "x");
            assert!(stmt.alternate.is_none());
        }
        stmt => panic!("expected if statement, got {:?}", stmt),
    }
}

#[test]
fn test_if_lsif_ls_statement() {
    let program = parse("if x < y: x. lsif x > y: y. lsif x = y: 0. ls: gives x + y..");
    assert_eq!(program.statements.len(), 1);

    match &program.statements[0] {
        Statement::If(stmt) => {
            let conditions: Vec<String> = stmt
                .conditionals
                .iter()
                .map(|c| format!("{} {}", c.token.literal, c.condition))
                .collect();
            assert_eq!(conditions, vec!["if (x < y)", "lsif (x > y)", "lsif (x = y)"]);

            let alternate = stmt.alternate.as_ref().map(ToString::to_string);
            assert_eq!(alternate, Some("gives (x + y).".to_owned()));
        }
        stmt => panic!("expected if statement, got {:?}", stmt),
    }

    assert_eq!(
        program.to_string(),
        "if (x < y): x. lsif (x > y): y. lsif (x = y): 0. ls: gives (x + y).."
    );
}

#[test]
fn test_nested_if_in_block() {
    let program = parse("if 10 > 1: if 1 > 2: gives 2. lsif 1 < 3: gives 3.. gives 1..");
    assert_eq!(program.statements.len(), 1);

    match &program.statements[0] {
        Statement::If(stmt) => {
            let outer = &stmt.conditionals[0].consequence;
            assert_eq!(outer.statements.len(), 2);
            assert!(matches!(outer.statements[0], Statement::If(_)));
            assert_eq!(outer.statements[1].to_string(), "gives 1.");
        }
        stmt => panic!("expected if statement, got {:?}", stmt),
    }
}

#[test]
fn test_for_statement() {
    let cases = vec![
        ("4 i < 3: i be i + 1..", "(i < 3)", 1),
        ("for ay: ahoy(1). break..", "ay", 2),
        ("4 nay: .", "nay", 0),
    ];

    for (input, condition, body_len) in cases.into_iter() {
        let program = parse(input);
        assert_eq!(program.statements.len(), 1, "{}", input);

        match &program.statements[0] {
            Statement::For(stmt) => {
                assert_eq!(stmt.condition.to_string(), condition);
                assert_eq!(stmt.body.statements.len(), body_len);
            }
            stmt => panic!("expected for statement, got {:?}", stmt),
        }
    }
}

#[test]
fn test_function_literal_parsing() {
    match single_expression("f(x, y): x + y..") {
        Expression::Function(func) => {
            let params: Vec<&str> = func.parameters.iter().map(|p| p.value.as_str()).collect();
            assert_eq!(params, vec!["x", "y"]);
            assert_eq!(func.body.statements.len(), 1);
            assert_eq!(func.body.statements[0].to_string(), "(x + y)");
            assert_eq!(func.to_string(), "f(x, y): (x + y).");
        }
        expr => panic!("expected function literal, got {:?}", expr),
    }
}

#[test]
fn test_function_parameter_parsing() {
    let cases = vec![
        ("f(): ..", vec![]),
        ("f(x): ..", vec!["x"]),
        ("f(x, y, z): ..", vec!["x", "y", "z"]),
    ];

    for (input, expected) in cases.into_iter() {
        match single_expression(input) {
            Expression::Function(func) => {
                let params: Vec<&str> = func.parameters.iter().map(|p| p.value.as_str()).collect();
                assert_eq!(params, expected);
                assert!(func.body.statements.is_empty());
            }
            expr => panic!("expected function literal, got {:?}", expr),
        }
    }
}

#[test]
fn test_call_expression_parsing() {
    match single_expression("add(1, 2 * 3, 4 + 5).") {
        Expression::Call(call) => {
            assert_eq!(call.function.to_string(), "add");
            let args: Vec<String> = call.arguments.iter().map(Expression::to_string).collect();
            assert_eq!(args, vec!["1", "(2 * 3)", "(4 + 5)"]);
        }
        expr => panic!("expected call expression, got {:?}", expr),
    }
}

#[test]
fn test_array_and_index_parsing() {
    match single_expression("[1, 2 * 2, 3 + 3].") {
        Expression::Array(array) => {
            let elements: Vec<String> = array.elements.iter().map(Expression::to_string).collect();
            assert_eq!(elements, vec!["1", "(2 * 2)", "(3 + 3)"]);
        }
        expr => panic!("expected array literal, got {:?}", expr),
    }

    match single_expression("[].") {
        Expression::Array(array) => assert!(array.elements.is_empty()),
        expr => panic!("expected array literal, got {:?}", expr),
    }

    match single_expression("myArray[1 + 1].") {
        Expression::Index(index) => {
            assert_eq!(index.left.to_string(), "myArray");
            assert_eq!(index.index.to_string(), "(1 + 1)");
        }
        expr => panic!("expected index expression, got {:?}", expr),
    }
}

#[test]
fn test_hash_literal_parsing() {
    let cases = vec![
        (
            "{\"one\": 1, \"two\": 2, \"three\": 3}.",
            vec![("\"one\"", "1"), ("\"two\"", "2"), ("\"three\"", "3")],
        ),
        ("{}.", vec![]),
        (
            "{\"one\": 0 + 1, \"two\": 10 - 8, \"three\": 15 / 5}.",
            vec![
                ("\"one\"", "(0 + 1)"),
                ("\"two\"", "(10 - 8)"),
                ("\"three\"", "(15 / 5)"),
            ],
        ),
        ("{1: ay, nay: 'x'}.", vec![("1", "ay"), ("nay", "\"x\"")]),
    ];

    for (input, expected) in cases.into_iter() {
        match single_expression(input) {
            Expression::HashMap(hash) => {
                let pairs: Vec<(String, String)> = hash
                    .pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                let expected: Vec<(String, String)> = expected
                    .into_iter()
                    .map(|(k, v)| (k.to_owned(), v.to_owned()))
                    .collect();
                assert_eq!(pairs, expected, "{}", input);
            }
            expr => panic!("expected hash literal, got {:?}", expr),
        }
    }
}

#[test]
fn test_index_assignment() {
    let program = parse("x['hi'] be 6. y[0][1] be y[1].");
    assert_eq!(program.statements.len(), 2);

    match &program.statements[0] {
        Statement::IndexAssign(stmt) => {
            assert_eq!(stmt.left.to_string(), "x");
            assert_eq!(stmt.index.to_string(), "\"hi\"");
            assert_eq!(stmt.value.to_string(), "6");
        }
        stmt => panic!("expected index assignment, got {:?}", stmt),
    }

    match &program.statements[1] {
        Statement::IndexAssign(stmt) => {
            assert_eq!(stmt.left.to_string(), "(y[0])");
            assert_eq!(stmt.index.to_string(), "1");
            assert_eq!(stmt.value.to_string(), "(y[1])");
        }
        stmt => panic!("expected index assignment, got {:?}", stmt),
    }
}

#[test]
fn test_chest_statement() {
    let cases = vec![
        ("chest Point|x, y|.", "Point", vec!["x", "y"]),
        ("chest Unit||", "Unit", vec![]),
        ("chest Ship|name|.", "Ship", vec!["name"]),
    ];

    for (input, name, fields) in cases.into_iter() {
        let program = parse(input);
        assert_eq!(program.statements.len(), 1, "{}", input);

        match &program.statements[0] {
            Statement::Chest(stmt) => {
                assert_eq!(stmt.name.value, name);
                let got: Vec<&str> = stmt.fields.iter().map(|f| f.value.as_str()).collect();
                assert_eq!(got, fields);
            }
            stmt => panic!("expected chest statement, got {:?}", stmt),
        }
    }
}

#[test]
fn test_chest_expressions() {
    match single_expression("Point|1, 2 + 3|.") {
        Expression::ChestInstantiation(inst) => {
            assert_eq!(inst.chest.to_string(), "Point");
            let args: Vec<String> = inst.arguments.iter().map(Expression::to_string).collect();
            assert_eq!(args, vec!["1", "(2 + 3)"]);
            assert!(inst.named.is_empty());
        }
        expr => panic!("expected chest instantiation, got {:?}", expr),
    }

    match single_expression("Point|x: 1, y: 2|.") {
        Expression::ChestInstantiation(inst) => {
            assert!(inst.arguments.is_empty());
            let named: Vec<String> = inst
                .named
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect();
            assert_eq!(named, vec!["x=1", "y=2"]);
        }
        expr => panic!("expected chest instantiation, got {:?}", expr),
    }

    match single_expression("Point|x|.") {
        Expression::ChestInstantiation(inst) => {
            assert_eq!(inst.arguments.len(), 1);
        }
        expr => panic!("expected chest instantiation, got {:?}", expr),
    }

    match single_expression("Unit||.") {
        Expression::ChestInstantiation(inst) => {
            assert!(inst.arguments.is_empty());
            assert!(inst.named.is_empty());
        }
        expr => panic!("expected chest instantiation, got {:?}", expr),
    }

    match single_expression("|a: 1, b: 'two'|.") {
        Expression::ChestLiteral(lit) => {
            assert_eq!(lit.to_string(), "|a: 1, b: \"two\"|");
        }
        expr => panic!("expected chest literal, got {:?}", expr),
    }

    match single_expression("ship|crew|captain.") {
        Expression::ChestAccess(access) => {
            assert_eq!(access.field.value, "captain");
            assert_eq!(access.left.to_string(), "ship|crew");
        }
        expr => panic!("expected chest access, got {:?}", expr),
    }

    match single_expression("p|greet(1).") {
        Expression::Call(call) => assert_eq!(call.function.to_string(), "p|greet"),
        expr => panic!("expected call expression, got {:?}", expr),
    }
}

#[test]
fn test_chest_field_assignment() {
    let program = parse("p|x be p|y * 2.");

    match &program.statements[0] {
        Statement::ChestFieldAssign(stmt) => {
            assert_eq!(stmt.left.to_string(), "p");
            assert_eq!(stmt.field.value, "x");
            assert_eq!(stmt.value.to_string(), "(p|y * 2)");
        }
        stmt => panic!("expected chest field assignment, got {:?}", stmt),
    }
}

#[test]
fn test_parse_errors() {
    let cases = vec![
        ("yar x 5.", vec!["Next token expected: BE, got INT. Line: 1 Char: 7"]),
        ("@", vec!["Unknown token found: @. Line: 1 Char: 1"]),
        (
            "yar a be 1.\n+.",
            vec![
                "no prefix parse function for + found. Line: 2 Char: 1",
                "no prefix parse function for . found. Line: 2 Char: 2",
            ],
        ),
        (
            "yar n be 99999999999999999999.",
            vec![
                "could not parse \"99999999999999999999\" as integer. Line: 1 Char: 10",
                "no prefix parse function for . found. Line: 1 Char: 30",
            ],
        ),
        (
            "f(x y): x..",
            vec![
                "Next token expected: ), got IDENT. Line: 1 Char: 5",
                "no prefix parse function for ) found. Line: 1 Char: 6",
                "no prefix parse function for : found. Line: 1 Char: 7",
                "no prefix parse function for . found. Line: 1 Char: 11",
            ],
        ),
    ];

    for (input, expected) in cases.into_iter() {
        let (_, errors) = Parser::new(Lexer::new(input)).parse();
        assert_eq!(errors, expected, "{}", input);
    }
}

#[test]
fn test_parse_program_rejects_errors() {
    let result = Parser::new(Lexer::new("yar be 5.")).parse_program();
    let errors = result.expect_err("expected parse errors");

    assert_eq!(errors[0], "Next token expected: IDENT, got BE. Line: 1 Char: 5");
}

#[test]
fn test_printed_program_reparses() {
    let cases = vec![
        "yar add be f(x, y): gives x + y.. add(1, 2 * 3).",
        "if a < b: ahoy(a). lsif a = b: ahoy('same'). ls: break..",
        "4 i < 10: i be i + 1. if i = 5: break...",
        "x[1] be {\"k\": [1, 2], 3: nay}.",
        "chest P|x, y|. yar p be P|x: 1, y: 2|. p|x be p|y * 2. |a: 'say \"hi\"'|.",
        "-a * !b = (c mod 3). gives.",
        "f(): .. port map.",
        "yar n be 404. n[0] be P|1, n|.",
    ];

    for input in cases.into_iter() {
        let printed = print_terminated(parse(input));
        let reparsed = parse(&printed);
        assert_eq!(reparsed, parse(input), "{}", input);

        let reprinted = print_terminated(reparsed);
        assert_eq!(reprinted, printed, "{}", input);
    }
}

fn parse(input: &str) -> ast::Program {
    match Parser::new(Lexer::new(input)).parse_program() {
        Ok(program) => program,
        Err(errors) => panic!("parse errors in {:?}: {:?}", input, errors),
    }
}

fn single_expression(input: &str) -> Expression {
    let mut program = parse(input);
    assert_eq!(program.statements.len(), 1, "{}", input);

    match program.statements.remove(0) {
        Statement::Expr(stmt) => stmt.expression,
        stmt => panic!("expected expression statement, got {:?}", stmt),
    }
}

/// Prints a program the way a block prints its body, so every statement
/// keeps its terminator and the output can be parsed again.
fn print_terminated(program: ast::Program) -> String {
    ast::BlockStatement {
        token: Token::new(TokenType::Eof, ""),
        statements: program.statements,
    }
    .to_string()
}
