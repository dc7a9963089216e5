//! Additive dice expressions such as `2d6 + d4 - 1`.

use std::fmt;
use std::str::FromStr;

use super::die::{MAX_DICE, roll_plain, sum_rolls};
use crate::env::DiceRoller;
use crate::error::RollError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Term {
    Dice { count: u32, faces: u32, negative: bool },
    Flat(i32),
}

/// A parsed expression: terms joined by `+` or `-`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expression {
    terms: Vec<Term>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpressionRoll {
    pub total: i32,
    pub breakdown: String,
}

impl Expression {
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn roll<R>(&self, roller: &mut R) -> ExpressionRoll
    where
        R: DiceRoller + ?Sized,
    {
        let mut total: i32 = 0;
        let mut breakdown = String::new();
        for term in &self.terms {
            let (value, shown) = match *term {
                Term::Dice {
                    count,
                    faces,
                    negative,
                } => {
                    let rolls = roll_plain(roller, count, faces);
                    let sum = sum_rolls(&rolls);
                    let list = rolls
                        .iter()
                        .map(u32::to_string)
                        .collect::<Vec<_>>()
                        .join(", ");
                    let value = if negative { -sum } else { sum };
                    (value, format!("{sum} [{count}d{faces}: {list}]"))
                }
                Term::Flat(n) => (n, n.unsigned_abs().to_string()),
            };
            if breakdown.is_empty() {
                if value < 0 {
                    breakdown.push('-');
                }
            } else {
                breakdown.push_str(if value < 0 { " - " } else { " + " });
            }
            breakdown.push_str(&shown);
            total = total.saturating_add(value);
        }
        ExpressionRoll { total, breakdown }
    }
}

impl FromStr for Expression {
    type Err = RollError;

    fn from_str(expr: &str) -> Result<Self, Self::Err> {
        let malformed = |reason| RollError::MalformedExpression {
            expr: expr.to_owned(),
            reason,
        };

        let compact: String = expr.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(malformed("empty expression"));
        }

        let mut terms = Vec::new();
        let mut rest = compact.as_str();
        let mut negative = false;
        if let Some(stripped) = rest.strip_prefix('-') {
            negative = true;
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix('+') {
            rest = stripped;
        }

        loop {
            let end = rest.find(['+', '-']).unwrap_or(rest.len());
            let (token, tail) = rest.split_at(end);
            terms.push(parse_term(token, negative).map_err(malformed)?);

            let mut chars = tail.chars();
            match chars.next() {
                None => break,
                Some(op) => {
                    negative = op == '-';
                    rest = chars.as_str();
                }
            }
        }

        Ok(Self { terms })
    }
}

fn parse_term(token: &str, negative: bool) -> Result<Term, &'static str> {
    if token.is_empty() {
        return Err("missing term");
    }
    match token.split_once(['d', 'D']) {
        Some((count, faces)) => {
            let count = if count.is_empty() {
                1
            } else {
                count.parse::<u32>().map_err(|_| "bad dice count")?
            };
            let faces = faces.parse::<u32>().map_err(|_| "bad die size")?;
            if faces == 0 {
                return Err("bad die size");
            }
            if count > MAX_DICE {
                return Err("too many dice");
            }
            Ok(Term::Dice {
                count,
                faces,
                negative,
            })
        }
        None => {
            let n = token.parse::<i32>().map_err(|_| "bad number")?;
            Ok(Term::Flat(if negative { -n } else { n }))
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            let (negative, body) = match *term {
                Term::Dice {
                    count,
                    faces,
                    negative,
                } => (negative, format!("{count}d{faces}")),
                Term::Flat(n) => (n < 0, n.abs().to_string()),
            };
            match (i, negative) {
                (0, true) => write!(f, "-{body}")?,
                (0, false) => write!(f, "{body}")?,
                (_, true) => write!(f, " - {body}")?,
                (_, false) => write!(f, " + {body}")?,
            }
        }
        Ok(())
    }
}
