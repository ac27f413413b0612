use soroban_sdk::Env;

/// Returns `Err($err)` from the enclosing function unless every argument is
/// strictly positive.
#[macro_export]
macro_rules! validate_int_parameters {
    ($err:expr; $($arg:expr),+ $(,)?) => {
        $(
            if $arg <= 0 {
                return Err($err);
            }
        )+
    };
}

/// Like [`validate_int_parameters`] but zero is accepted.
#[macro_export]
macro_rules! validate_non_negative_parameters {
    ($err:expr; $($arg:expr),+ $(,)?) => {
        $(
            if $arg < 0 {
                return Err($err);
            }
        )+
    };
}

/// A deadline is inclusive: a call made exactly at `deadline` is still valid.
pub fn is_deadline_passed(env: &Env, deadline: u64) -> bool {
    env.ledger().timestamp() > deadline
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::Ledger;
    use test_case::test_case;

    fn positive(a: i128, b: i128, c: i128) -> Result<(), u32> {
        validate_int_parameters!(7; a, b, c);
        Ok(())
    }

    fn non_negative(a: i128, b: i128) -> Result<(), u32> {
        validate_non_negative_parameters!(9; a, b,);
        Ok(())
    }

    #[test_case(1, 2, 3 => Ok(()); "all positive")]
    #[test_case(0, 1, 3 => Err(7); "first zero")]
    #[test_case(1, -2, 3 => Err(7); "middle negative")]
    #[test_case(1, 1, 0 => Err(7); "last zero")]
    fn test_validate_int_parameters(a: i128, b: i128, c: i128) -> Result<(), u32> {
        positive(a, b, c)
    }

    #[test_case(0, 0 => Ok(()); "zeros accepted")]
    #[test_case(5, 0 => Ok(()); "positive and zero")]
    #[test_case(-1, 0 => Err(9); "negative rejected")]
    fn test_validate_non_negative_parameters(a: i128, b: i128) -> Result<(), u32> {
        non_negative(a, b)
    }

    #[test]
    fn deadline_is_inclusive() {
        let env = Env::default();
        env.ledger().set_timestamp(1_000);

        assert!(!is_deadline_passed(&env, 1_000));
        assert!(!is_deadline_passed(&env, 1_001));
        assert!(is_deadline_passed(&env, 999));
    }
}
