use omnicalc::{evaluate, ErrorKind};

fn assert_display(text: &str, expected: &str) {
    match evaluate(text) {
        Ok(display) => assert_eq!(display, expected, "for input '{}'", text),
        Err(e) => panic!("expected '{}' for '{}', got error {}", expected, text, e),
    }
}

fn assert_error_kind(text: &str, kind: ErrorKind) {
    match evaluate(text) {
        Ok(display) => panic!("expected {} for '{}', got '{}'", kind, text, display),
        Err(e) => assert_eq!(e.kind(), kind, "for input '{}'", text),
    }
}

#[test]
fn test_integer_arithmetic() {
    assert_display("2+2", "4");
    assert_display("10/4", "2.5");
    assert_display("1+2*3-4", "3");
    assert_display("7-10", "-3");
    assert_display("(1+2)*(3+4)", "21");
}

#[test]
fn test_decimal_precision() {
    assert_display("0.1+0.2", "0.3");
    assert_display("0.3-0.1", "0.2");
    assert_display("1.1*1.1", "1.21");
    assert_display("1/3*3", "1");
}

#[test]
fn test_exponentiation() {
    assert_display("2^10", "1024");
    // right-associative: 2^(3^2), not (2^3)^2
    assert_display("2^3^2", "512");
    assert_display("2^-2", "0.25");
    assert_display("-2^2", "-4");
    assert_display("(-2)^2", "4");
}

#[test]
fn test_factorial() {
    assert_display("5!", "120");
    assert_display("0!", "1");
    assert_display("3!!", "720");
    assert_error_kind("(-3)!", ErrorKind::DomainError);
    assert_error_kind("2.5!", ErrorKind::DomainError);
}

#[test]
fn test_percent() {
    assert_display("50%", "0.5");
    // flat rule: 10% is 0.1, not 10% of 100
    assert_display("100+10%", "100.1");
    assert_display("50%*2", "1");
}

#[test]
fn test_division_by_zero() {
    assert_error_kind("5/0", ErrorKind::DivisionByZero);
    assert_error_kind("1/(2-2)", ErrorKind::DivisionByZero);
}

#[test]
fn test_domain_errors() {
    assert_error_kind("sqrt(-4)", ErrorKind::DomainError);
    assert_error_kind("ln(0)", ErrorKind::DomainError);
    assert_error_kind("ln(-5)", ErrorKind::DomainError);
    assert_error_kind("log(0)", ErrorKind::DomainError);
    assert_error_kind("log(-5)", ErrorKind::DomainError);
}

#[test]
fn test_parenthesis_balance() {
    assert_error_kind("(2+3", ErrorKind::UnbalancedParentheses);
    assert!(evaluate("2+3)").is_err());
}

#[test]
fn test_malformed_input() {
    assert_error_kind("2+", ErrorKind::MissingOperand);
    assert_error_kind("2+*3", ErrorKind::MissingOperand);
    assert_error_kind("sin(1,2)", ErrorKind::WrongArity);
    assert_error_kind("nthRoot(8)", ErrorKind::WrongArity);
    assert_error_kind("2 3", ErrorKind::UnexpectedToken);
    assert_error_kind("2$3", ErrorKind::UnknownCharacter);
    assert_error_kind("foo(1)", ErrorKind::UnknownIdentifier);
}

#[test]
fn test_empty_input() {
    assert_error_kind("", ErrorKind::EmptyExpression);
    assert_error_kind("  ", ErrorKind::EmptyExpression);
}

#[test]
fn test_normalization_round_trip() {
    assert_eq!(evaluate("2×3÷1").unwrap(), evaluate("2*3/1").unwrap());
    assert_eq!(evaluate("√(16)").unwrap(), evaluate("sqrt(16)").unwrap());
    assert_eq!(evaluate("π").unwrap(), evaluate("pi").unwrap());
}

#[test]
fn test_trigonometry_in_degrees() {
    assert_display("sin(90)", "1");
    assert_display("sin(30)", "0.5");
    assert_display("cos(0)", "1");
    assert_display("cos(60)", "0.5");
    assert_display("tan(45)", "1");
    assert_display("sin(45)", "0.70710678118655");
    assert_error_kind("tan(90)", ErrorKind::DomainError);
    assert_display("asin(1)", "90");
    assert_display("atan(1)", "45");
}

#[test]
fn test_logarithms() {
    // UI log is base 10, ln is natural
    assert_display("log(100)", "2");
    assert_display("log(1000)", "3");
    assert_display("ln(e)", "1");
    assert_display("ln(1)", "0");
}

#[test]
fn test_roots() {
    assert_display("sqrt(16)", "4");
    assert_display("sqrt(2)", "1.4142135623731");
    // degree first, then radicand
    assert_display("nthRoot(3, 27)", "3");
    assert_display("nthRoot(2, 64)", "8");
    assert_display("nthRoot(3, -8)", "-2");
    assert_error_kind("nthRoot(2, -4)", ErrorKind::DomainError);
}

#[test]
fn test_constants() {
    assert_display("pi", "3.1415926535898");
    assert_display("e", "2.718281828459");
    assert_display("2*pi", "6.2831853071796");
}

#[test]
fn test_unary_minus() {
    assert_display("-5", "-5");
    assert_display("--5", "5");
    assert_display("2*-3", "-6");
    assert_display("-(1+2)", "-3");
    assert_display("2^-3", "0.125");
}

#[test]
fn test_overflow() {
    assert_error_kind("2^100000", ErrorKind::Overflow);
    assert_error_kind("5000!", ErrorKind::Overflow);
}

#[test]
fn test_exponential_display() {
    assert_display("2^60", "1.1529215046068e+18");
    assert_display("10^15", "1e+15");
    assert_display("10^-10", "1e-10");
    assert_display("10^14", "100000000000000");
}

#[test]
fn test_formatting_is_stable() {
    // the same input always renders the same string
    let first = evaluate("22/7").unwrap();
    let second = evaluate("22/7").unwrap();
    assert_eq!(first, second);
    assert_eq!(first, "3.1428571428571");
}

#[test]
fn test_whitespace_tolerated() {
    assert_display(" 2 +  2 ", "4");
    assert_display("sqrt( 16 )", "4");
    assert_display("2\t+\t2", "4");
    assert_display("1 +\t 2\r\n* 3", "7");
}
