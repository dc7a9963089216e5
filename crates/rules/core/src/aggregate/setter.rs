use crate::effect::Setter;

/// Reduces any number of setters to one.
///
/// The first hard setter (`min == false`) wins outright. Otherwise the
/// highest floor wins. No setters at all yields a floor of 0, which never
/// changes a score.
///
/// # Examples
///
/// ```
/// use rules_core::aggregate::combine_setters;
/// use rules_core::effect::Setter;
///
/// let floor = |score| Setter { score, min: true };
/// let hard = Setter { score: 10, min: false };
///
/// assert_eq!(combine_setters([floor(15), hard, floor(20)]), hard);
/// assert_eq!(combine_setters([floor(12), floor(16)]), floor(16));
/// assert_eq!(combine_setters([]), floor(0));
/// ```
pub fn combine_setters<I>(setters: I) -> Setter
where
    I: IntoIterator<Item = Setter>,
{
    let mut best = Setter {
        score: 0,
        min: true,
    };
    for setter in setters {
        if !setter.min {
            return setter;
        }
        if setter.score > best.score {
            best = setter;
        }
    }
    best
}

/// Applies a combined setter to a score.
pub fn apply_setter(setter: Setter, score: i32) -> i32 {
    if !setter.min || setter.score > score {
        setter.score
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn floor(score: i32) -> Setter {
        Setter { score, min: true }
    }

    const fn hard(score: i32) -> Setter {
        Setter { score, min: false }
    }

    #[test]
    fn first_hard_setter_wins_regardless_of_scores() {
        assert_eq!(combine_setters([floor(30), hard(10), hard(25)]), hard(10));
    }

    #[test]
    fn hard_setter_replaces_even_higher_scores() {
        assert_eq!(apply_setter(hard(10), 18), 10);
    }

    #[test]
    fn floor_only_raises() {
        assert_eq!(apply_setter(floor(19), 12), 19);
        assert_eq!(apply_setter(floor(19), 21), 21);
    }
}
