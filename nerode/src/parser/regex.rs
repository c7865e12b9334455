use crate::regex::Token;
use nom::branch::alt;
use nom::bytes::complete::take;
use nom::character::complete;
use nom::character::complete::multispace0;
use nom::combinator::{map, value};
use nom::multi::many0;
use nom::sequence::{preceded, terminated};
use nom::IResult;

pub(crate) fn tokens(input: &str) -> IResult<&str, Vec<Token>> {
    terminated(many0(preceded(multispace0, token)), multispace0)(input)
}

fn token(input: &str) -> IResult<&str, Token> {
    alt((operator, epsilon, literal))(input)
}

fn operator(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::LParen, complete::char('(')),
        value(Token::RParen, complete::char(')')),
        value(Token::Star, complete::char('*')),
        value(Token::Plus, complete::char('+')),
        value(Token::Question, complete::char('?')),
        value(Token::Concat, complete::char('.')),
        value(Token::Alternation, complete::char('|')),
    ))(input)
}

fn epsilon(input: &str) -> IResult<&str, Token> {
    value(Token::Epsilon, complete::char('ε'))(input)
}

fn literal(input: &str) -> IResult<&str, Token> {
    map(take(1usize), |s: &str| Token::Literal(one_char(s)))(input)
}

// Helper function to take a &str of one char and return that char, panicking in debug
// mode upon multiple chars
fn one_char(s: &str) -> char {
    let mut chars = s.chars();
    let char = chars.next().expect("take should take 1 char");
    #[cfg(debug_assertions)]
    assert_eq!(chars.next(), None, "take(1) should take only 1 character");
    char
}
