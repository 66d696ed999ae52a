//! Grammars shared by the front end and the interpreter: decimal literals,
//! register names, and the textual instruction records.

use crate::error::{Error, RuntimeError};
use crate::syntax::*;

use combine::error::ParseError;
use combine::parser::char::{char, digit, letter};
use combine::stream::Stream;
use combine::{attempt, eof, many1, optional, Parser};

/// `[0-9]+ ('.' [0-9]+)?`, yielding the matched text.
pub fn literal<I>() -> impl Parser<Input = I, Output = String>
where
    I: Stream<Item = char>,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    let fraction = attempt(char('.').with(many1::<String, _>(digit())));
    many1::<String, _>(digit()).and(optional(fraction)).map(
        |(whole, fraction): (String, Option<String>)| match fraction {
            Some(fraction) => format!("{}.{}", whole, fraction),
            None => whole,
        },
    )
}

/// A letter followed by one digit, e.g. `t3`.
pub fn register<I>() -> impl Parser<Input = I, Output = Register>
where
    I: Stream<Item = char>,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    letter()
        .with(digit())
        .map(|d: char| Register(d as usize - '0' as usize))
}

/// Matches the longest literal at the start of `text`.
pub fn scan_literal(text: &str) -> Option<Literal> {
    let (digits, _rest) = literal::<&str>().parse(text).ok()?;
    let value = digits.parse::<f64>().ok()?;
    Some(Literal {
        text: digits,
        value,
    })
}

fn decode_literal(field: &str) -> Option<Literal> {
    let (digits, _rest) = literal::<&str>().skip(eof()).parse(field).ok()?;
    let value = digits.parse::<f64>().ok()?;
    Some(Literal {
        text: digits,
        value,
    })
}

fn decode_register(field: &str) -> Option<Register> {
    register::<&str>().skip(eof()).parse(field).ok().map(|tuple| tuple.0)
}

fn decode_op2(op: &str, line: &str) -> Result<Op2, RuntimeError> {
    match op {
        "+" => Ok(Op2::Add),
        "*" => Ok(Op2::Mul),
        _ => Err(RuntimeError::UnsupportedOperator {
            op: op.to_string(),
            line: line.to_string(),
        }),
    }
}

/// Decodes one record of the instruction buffer. Records are told apart by
/// their number of whitespace-separated fields.
pub fn decode(line: &str) -> Result<Instr, Error> {
    let malformed = || RuntimeError::MalformedInstruction {
        line: line.to_string(),
    };
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        [dst, "=", lit] => {
            let dst = decode_register(dst).ok_or_else(malformed)?;
            let lit = decode_literal(lit).ok_or_else(malformed)?;
            Ok(Instr::Load(dst, lit))
        }
        [dst, "=", left, op, right] => {
            let dst = decode_register(dst).ok_or_else(malformed)?;
            let left = decode_register(left).ok_or_else(malformed)?;
            let right = decode_register(right).ok_or_else(malformed)?;
            let op = decode_op2(op, line)?;
            Ok(Instr::Op2(dst, left, op, right))
        }
        _ => Err(malformed().into()),
    }
}
