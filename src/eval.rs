//! Walks the expression tree bottom-up and produces one
//! [`Number`](crate::Number) per node. The first error aborts the walk; no
//! partial result survives.

use crate::parse::Ast;
use crate::value::Number;
use crate::CalcResult;

pub fn eval(ast: &Ast) -> CalcResult<Number> {
    match ast {
        Ast::Num(n) => Ok(n.clone()),
        Ast::Const(c) => Ok(c.value()),
        Ast::Unary(kind, operand) => kind.apply(&eval(operand)?),
        Ast::Bin(kind, lhs, rhs) => kind.apply(&eval(lhs)?, &eval(rhs)?),
        Ast::Call(f, args) => {
            let values = args.iter().map(eval).collect::<CalcResult<Vec<_>>>()?;
            f.apply(&values)
        }
    }
}
