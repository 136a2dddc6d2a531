use crate::error::BuildError;
use std::path::Path;
use tracing::info;

/// Transforms a theme stylesheet into the published one.
pub trait CssProcessor: Send + Sync {
    fn transform(&self, source: &str) -> Result<String, String>;
}

/// Strips comments and blank lines, and rejects unbalanced braces.
///
/// Quoted strings are copied untouched: braces and comment markers inside
/// them do not count.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCssProcessor;

impl CssProcessor for StandardCssProcessor {
    fn transform(&self, source: &str) -> Result<String, String> {
        let stripped = strip_comments_checked(source)?;

        let mut output = stripped
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        output.push('\n');
        Ok(output)
    }
}

/// One pass over the source that drops `/* */` comments outside strings
/// and checks brace nesting.
fn strip_comments_checked(source: &str) -> Result<String, String> {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut line = 1usize;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    while let Some(ch) = chars.next() {
        if ch == '\n' {
            line += 1;
        }

        if let Some(open) = quote {
            out.push(ch);
            match ch {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        if escaped == '\n' {
                            line += 1;
                        }
                        out.push(escaped);
                    }
                }
                '\n' => return Err(format!("unterminated string on line {}", line - 1)),
                c if c == open => quote = None,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' | '\'' => {
                quote = Some(ch);
                out.push(ch);
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let start = line;
                let mut closed = false;
                while let Some(c) = chars.next() {
                    if c == '\n' {
                        line += 1;
                        out.push('\n');
                    } else if c == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Err(format!("unterminated comment starting on line {}", start));
                }
            }
            '{' => {
                depth += 1;
                out.push(ch);
            }
            '}' => {
                if depth == 0 {
                    return Err(format!("unexpected '}}' on line {}", line));
                }
                depth -= 1;
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }

    if let Some(open) = quote {
        return Err(format!("unterminated {} string", open));
    }
    if depth != 0 {
        return Err(format!("{} unclosed '{{'", depth));
    }
    Ok(out)
}

/// Read `input`, run it through `processor` and write `output`.
///
/// Any failure is a `CssProcessing` error.
pub async fn process_stylesheet(
    processor: &dyn CssProcessor,
    input: &Path,
    output: &Path,
) -> Result<(), BuildError> {
    let source = tokio::fs::read_to_string(input)
        .await
        .map_err(|e| BuildError::CssProcessing(format!("{}: {}", input.display(), e)))?;

    let css = processor
        .transform(&source)
        .map_err(|reason| BuildError::CssProcessing(format!("{}: {}", input.display(), reason)))?;

    tokio::fs::write(output, css)
        .await
        .map_err(|e| BuildError::CssProcessing(format!("{}: {}", output.display(), e)))?;

    info!("Processed stylesheet {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_strips_comments_and_blank_lines() {
        let css = "/* header */\nbody {\n  color: red; /* inline */\n}\n\n\n/* multi\nline */\nh1 { margin: 0; }\n";
        let output = StandardCssProcessor.transform(css).unwrap();
        assert_eq!(output, "body {\n  color: red;\n}\nh1 { margin: 0; }\n");
    }

    #[test]
    fn test_rejects_unbalanced_braces() {
        assert!(StandardCssProcessor.transform("body { color: red;").is_err());
        let err = StandardCssProcessor.transform("body { }\n}").unwrap_err();
        assert!(err.contains("line 2"));
    }

    #[test]
    fn test_braces_inside_comments_are_ignored() {
        assert!(StandardCssProcessor.transform("/* { */ a { }").is_ok());
    }

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let output = StandardCssProcessor
            .transform("a::after { content: \"}\"; }\nb::before { content: '{'; }\n")
            .unwrap();
        assert_eq!(output, "a::after { content: \"}\"; }\nb::before { content: '{'; }\n");
    }

    #[test]
    fn test_comment_markers_inside_strings_are_kept() {
        let output = StandardCssProcessor
            .transform("a::after { content: \"/* x */\"; } /* gone */\n")
            .unwrap();
        assert_eq!(output, "a::after { content: \"/* x */\"; }\n");
    }

    #[test]
    fn test_escaped_quotes_stay_inside_string() {
        let output = StandardCssProcessor
            .transform(r#"a { content: "\"}"; }"#)
            .unwrap();
        assert_eq!(output, "a { content: \"\\\"}\"; }\n");
    }

    #[test]
    fn test_rejects_unterminated_comment_and_string() {
        assert!(StandardCssProcessor.transform("a { } /* open").is_err());
        assert!(StandardCssProcessor.transform("a { content: \"x; }").is_err());
    }

    #[tokio::test]
    async fn test_missing_input_is_css_error() {
        let dir = TempDir::new().unwrap();
        let err = process_stylesheet(
            &StandardCssProcessor,
            &dir.path().join("missing.css"),
            &dir.path().join("out.css"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, BuildError::CssProcessing(_)));
    }

    #[tokio::test]
    async fn test_process_writes_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.css");
        let output = dir.path().join("out.css");
        std::fs::write(&input, "a { color: blue; }\n").unwrap();

        process_stylesheet(&StandardCssProcessor, &input, &output).await.unwrap();
        assert_eq!(std::fs::read_to_string(output).unwrap(), "a { color: blue; }\n");
    }
}
