use anyhow::{Context, Result};

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Parse a comma-separated list of numeric seeds.
pub fn parse_seeds(s: &str) -> Result<Vec<u64>> {
    let seeds = split_csv(s)
        .iter()
        .map(|token| {
            token
                .parse::<u64>()
                .with_context(|| format!("invalid seed {token:?}"))
        })
        .collect::<Result<Vec<_>>>()?;
    anyhow::ensure!(!seeds.is_empty(), "at least one seed is required");
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_csv_trims_and_filters() {
        let parts = split_csv(" hilo, ,stocks,  crimes ");
        assert_eq!(parts, vec!["hilo", "stocks", "crimes"]);
    }

    #[test]
    fn seeds_parse_or_explain() {
        assert_eq!(parse_seeds("1, 2,1337").unwrap(), vec![1, 2, 1337]);
        let err = parse_seeds("1,two").unwrap_err();
        assert!(err.to_string().contains("\"two\""), "{err}");
        assert!(parse_seeds(" , ").is_err());
    }
}
