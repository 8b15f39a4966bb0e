pub const USAGE: &str = "Usage: ask <your question>";

/// What one invocation should do, decided from the arguments after the
/// program name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// No arguments: print the usage line and exit successfully without
    /// touching settings, context, or model.
    Usage,
    /// First argument is `clear` (ASCII case-insensitive); extra arguments
    /// are ignored.
    Clear,
    /// All arguments joined with single spaces form the user's question.
    Ask(String),
}

impl Command {
    pub fn parse(args: &[String]) -> Self {
        match args.first() {
            None => Command::Usage,
            Some(first) if first.eq_ignore_ascii_case("clear") => Command::Clear,
            Some(_) => Command::Ask(args.join(" ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn no_arguments_is_usage() {
        assert_eq!(Command::parse(&[]), Command::Usage);
    }

    #[test]
    fn words_join_with_single_spaces() {
        assert_eq!(
            Command::parse(&args(&["how", "are", "you"])),
            Command::Ask("how are you".into())
        );
    }

    #[test]
    fn single_word_question_passes_through() {
        assert_eq!(Command::parse(&args(&["hello"])), Command::Ask("hello".into()));
    }

    #[test]
    fn clear_matches_case_insensitively() {
        for word in ["clear", "CLEAR", "Clear"] {
            assert_eq!(Command::parse(&args(&[word])), Command::Clear);
        }
    }

    #[test]
    fn clear_ignores_extra_arguments() {
        assert_eq!(Command::parse(&args(&["clear", "now"])), Command::Clear);
    }

    #[test]
    fn clear_inside_a_question_is_not_the_subcommand() {
        assert_eq!(
            Command::parse(&args(&["please", "clear", "this"])),
            Command::Ask("please clear this".into())
        );
    }
}
