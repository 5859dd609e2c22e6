//! Checks on manifest source text that the parsed model cannot see.

/// A YAML tag (`!ENV`, `!!python/name:...`) found in manifest source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YamlTag {
    /// 1-based line number.
    pub line: usize,
    /// The tag as written, including the leading `!`.
    pub tag: String,
}

/// Find the first YAML tag in `source`, ignoring quoted text and comments.
///
/// Emitting a parsed manifest does not reproduce tags faithfully (core
/// `!!python/...` tags collapse to empty strings at parse time), so callers
/// that rewrite the file use this to refuse.
pub fn find_yaml_tag(source: &str) -> Option<YamlTag> {
    source
        .lines()
        .enumerate()
        .find_map(|(idx, line)| tag_in_line(line).map(|tag| YamlTag { line: idx + 1, tag }))
}

fn tag_in_line(line: &str) -> Option<String> {
    let mut in_single = false;
    let mut in_double = false;
    let mut prev = ' ';

    for (pos, ch) in line.char_indices() {
        match ch {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            '#' if !in_single && !in_double && prev.is_whitespace() => return None,
            '!' if !in_single && !in_double && matches!(prev, ' ' | '\t' | '[' | '{' | ',') => {
                let tag: String = line[pos..]
                    .chars()
                    .take_while(|c| !c.is_whitespace() && !matches!(c, ',' | ']' | '}'))
                    .collect();
                return Some(tag);
            }
            _ => {}
        }
        prev = ch;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_python_name_tag() {
        let source = r"
site_name: x
markdown_extensions:
  - pymdownx.superfences:
      custom_fences:
        - name: mermaid
          format: !!python/name:pymdownx.superfences.fence_code_format
";
        assert_eq!(
            find_yaml_tag(source),
            Some(YamlTag {
                line: 7,
                tag: "!!python/name:pymdownx.superfences.fence_code_format".to_owned(),
            })
        );
    }

    #[test]
    fn test_env_tag() {
        let tag = find_yaml_tag("site_name: x\nsite_url: !ENV [SITE_URL, 'http://x']\n").unwrap();
        assert_eq!(tag.line, 2);
        assert_eq!(tag.tag, "!ENV");
    }

    #[test]
    fn test_tag_at_line_start() {
        assert_eq!(find_yaml_tag("!ENV x").map(|t| t.line), Some(1));
    }

    #[test]
    fn test_bang_in_text_is_not_a_tag() {
        let source = r#"
site_name: Hello!
site_description: "Fast !important"
copyright: 'It is !fine'
# theme: !ENV THEME
repo_url: https://x # see !docs
"#;
        assert_eq!(find_yaml_tag(source), None);
    }
}
