//! Raw input tokenization.

/// Result of tokenizing one line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedInput {
    /// Whitespace-only input. Dispatch is a no-op.
    Empty,
    /// Slash-prefixed command. `name` is the lowercased first token
    /// (slash included); `args` keep their original case.
    Command { name: String, args: Vec<String> },
    /// Anything else is routed verbatim to the coordinator.
    FreeText(String),
}

/// Tokenize raw input. Splits on runs of whitespace; no quoting or
/// escaping. Consumers wanting a multi-word argument join trailing
/// tokens with spaces.
pub fn parse(raw: &str) -> ParsedInput {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ParsedInput::Empty;
    }
    if !trimmed.starts_with('/') {
        return ParsedInput::FreeText(trimmed.to_string());
    }
    let mut tokens = trimmed.split_whitespace();
    let name = match tokens.next() {
        Some(first) => first.to_lowercase(),
        None => return ParsedInput::Empty,
    };
    let args = tokens.map(str::to_string).collect();
    ParsedInput::Command { name, args }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_is_empty() {
        assert_eq!(parse(""), ParsedInput::Empty);
        assert_eq!(parse("   \t  "), ParsedInput::Empty);
    }

    #[test]
    fn command_name_is_lowercased_args_keep_case() {
        let parsed = parse("/Outreach Jane jane@x.com Stripe");
        match parsed {
            ParsedInput::Command { name, args } => {
                assert_eq!(name, "/outreach");
                assert_eq!(args, vec!["Jane", "jane@x.com", "Stripe"]);
            }
            other => panic!("expected command, got {other:?}"),
        }
    }

    #[test]
    fn splits_on_runs_of_whitespace() {
        let parsed = parse("  /craft   Stripe   Senior  Engineer ");
        match parsed {
            ParsedInput::Command { name, args } => {
                assert_eq!(name, "/craft");
                assert_eq!(args, vec!["Stripe", "Senior", "Engineer"]);
            }
            other => panic!("expected command, got {other:?}"),
        }
    }

    #[test]
    fn unprefixed_text_is_free_text() {
        assert_eq!(
            parse("  find me remote roles  "),
            ParsedInput::FreeText("find me remote roles".to_string())
        );
    }
}
