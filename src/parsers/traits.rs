use crate::errors::ParseResult;

pub trait Parser {
    type Output;

    fn parse(content: &str) -> ParseResult<Vec<Self::Output>>;
}
