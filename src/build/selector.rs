//! Root language selector page for multi-language builds without a
//! default language.

use crate::i18n::{LanguageCode, LanguageRegistry};

const SELECTOR_STYLE: &str = r#"    * { margin: 0; padding: 0; box-sizing: border-box; }
    body {
      font-family: system-ui, -apple-system, sans-serif;
      background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
      min-height: 100vh;
      display: flex;
      align-items: center;
      justify-content: center;
    }
    .container {
      background: white;
      border-radius: 12px;
      padding: 3rem;
      box-shadow: 0 20px 60px rgba(0, 0, 0, 0.3);
      max-width: 500px;
      width: 90%;
    }
    h1 { font-size: 2rem; margin-bottom: 0.5rem; color: #1a202c; }
    p { color: #718096; margin-bottom: 2rem; }
    .languages { display: flex; flex-direction: column; gap: 0.75rem; }
    .language-link {
      display: block;
      padding: 1rem 1.5rem;
      background: #f7fafc;
      border: 2px solid #e2e8f0;
      border-radius: 8px;
      text-decoration: none;
      color: #2d3748;
      font-weight: 500;
    }
    .language-link:hover { background: #667eea; border-color: #667eea; color: white; }"#;

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// HTML of the selector page, linking `<code>/` for each language.
///
/// Links are labelled with native language names. The prompt line repeats
/// the prompt in every built language that has selector strings.
pub fn render_language_selector(languages: &[LanguageCode]) -> String {
    let registry = LanguageRegistry::get();
    let canonical = registry.selector_strings(registry.canonical().code);

    let mut prompts: Vec<&str> = Vec::new();
    for language in languages {
        let prompt = registry.selector_strings(language.as_str()).prompt;
        if !prompts.contains(&prompt) {
            prompts.push(prompt);
        }
    }
    if prompts.is_empty() {
        prompts.push(canonical.prompt);
    }

    let links = languages
        .iter()
        .map(|language| {
            format!(
                r#"      <a href="{code}/" class="language-link" hreflang="{code}">{label}</a>"#,
                code = language,
                label = escape_html(&language.native_name())
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>
{style}
  </style>
</head>
<body>
  <div class="container">
    <h1>{heading}</h1>
    <p>{prompt}</p>
    <div class="languages">
{links}
    </div>
  </div>
</body>
</html>
"#,
        title = escape_html(canonical.title),
        style = SELECTOR_STYLE,
        heading = escape_html(canonical.heading),
        prompt = escape_html(&prompts.join(" / ")),
        links = links,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> Vec<LanguageCode> {
        list.iter().map(|c| LanguageCode::from_code(c).unwrap()).collect()
    }

    #[test]
    fn test_links_every_language_with_native_name() {
        let html = render_language_selector(&codes(&["en", "fr", "xx"]));
        assert!(html.contains(r#"<a href="en/" class="language-link" hreflang="en">English</a>"#));
        assert!(html.contains(r#"<a href="fr/" class="language-link" hreflang="fr">Français</a>"#));
        assert!(html.contains(r#"<a href="xx/" class="language-link" hreflang="xx">XX</a>"#));
        assert!(html.contains("<h1>Select Language</h1>"));
    }

    #[test]
    fn test_prompt_lists_each_language_once() {
        let html = render_language_selector(&codes(&["en", "fr", "it"]));
        assert!(html.contains("<p>Choose a language / Choisissez une langue</p>"));
    }
}
