//! Idempotent repair pass for generated demo pages.
//!
//! A previous, flawed conversion left template-literal delimiters where
//! CSS and script expect plain quotes. Two corruption signatures are
//! known: a CSS `content:` value wrapped in backticks, and a credential
//! placeholder (`apiKey:`) wrapped in backticks.
//!
//! The pass is a scanner over candidate properties, not a blind
//! substitution. Each occurrence is parsed (quote style, value,
//! terminator) and the terminator decides the context: `;` means CSS,
//! `,` means script. The canonical quoting differs per context: single
//! quotes for CSS, single quotes for script unless the value holds an
//! apostrophe, in which case a template literal is the only form that
//! does not need re-escaping. Occurrences already in canonical form are
//! detected and skipped, which is what makes repeated application a
//! provable no-op rather than an incidental one.

use crate::emit::escape::{escape_css_single_quoted, escape_js_single_quoted};
use crate::error::{Result, StackgenError};
use crate::fs::atomic_write_file;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::{Path, PathBuf};

/// Result of repairing one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairOutcome {
    pub text: String,
    pub changed: bool,
}

/// Result of repairing a tree.
#[derive(Debug, Default)]
pub struct RepairReport {
    /// Demo files examined.
    pub scanned: usize,
    /// Files rewritten.
    pub changed: usize,
    /// Files changed, for reporting.
    pub changed_files: Vec<PathBuf>,
    /// Per-file read/write failures; siblings are unaffected.
    pub errors: Vec<String>,
}

/// A parsed quoted literal inside the text.
struct Quoted<'a> {
    quote: char,
    /// Raw source text between the delimiters.
    inner: &'a str,
    /// Byte index just past the closing delimiter.
    end: usize,
}

/// Repair one file's text. Pure; apply-once and apply-twice agree.
pub fn repair_text(input: &str) -> RepairOutcome {
    let mut out = String::with_capacity(input.len());
    let mut changed = false;
    let mut pos = 0;

    while let Some((idx, token)) = next_candidate(input, pos) {
        let value_start = idx + token.len();
        out.push_str(&input[pos..value_start]);
        pos = value_start;

        // Whitespace between the colon and the value.
        let ws_len = input[pos..]
            .bytes()
            .take_while(|b| *b == b' ' || *b == b'\t')
            .count();

        let Some(quoted) = parse_quoted(input, pos + ws_len) else {
            // Not a quoted value (e.g. `justify-content: center`); leave it.
            continue;
        };
        let terminator = input[quoted.end..].chars().next();

        if let Some(replacement) = canonical_form(token, &quoted, terminator) {
            out.push_str(&input[pos..pos + ws_len]);
            out.push_str(&replacement);
            changed = true;
        } else {
            out.push_str(&input[pos..quoted.end]);
        }
        pos = quoted.end;
    }

    out.push_str(&input[pos..]);
    RepairOutcome { text: out, changed }
}

/// Repair every `**/demos/*_demo.html` file under `root`.
pub fn repair_tree(root: &Path) -> Result<RepairReport> {
    let matcher = demo_matcher()?;
    let mut files = Vec::new();
    collect_files(root, root, &matcher, &mut files)?;
    files.sort();

    let mut report = RepairReport::default();
    for path in files {
        report.scanned += 1;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                report.errors.push(format!("{}: {}", path.display(), e));
                continue;
            }
        };

        let outcome = repair_text(&text);
        if outcome.changed {
            match atomic_write_file(&path, &outcome.text) {
                Ok(()) => {
                    report.changed += 1;
                    report.changed_files.push(path);
                }
                Err(e) => report.errors.push(e.to_string()),
            }
        }
    }

    Ok(report)
}

/// The two property tokens the pass looks at.
const CANDIDATE_TOKENS: [&str; 2] = ["content:", "apiKey:"];

/// Earliest candidate token at or after `from`.
fn next_candidate(input: &str, from: usize) -> Option<(usize, &'static str)> {
    CANDIDATE_TOKENS
        .iter()
        .filter_map(|token| input[from..].find(token).map(|i| (from + i, *token)))
        .min_by_key(|(idx, _)| *idx)
}

/// Parse a quoted literal starting exactly at `start`, honoring
/// backslash escapes. Returns `None` if `start` is not a quote or the
/// literal never closes.
fn parse_quoted(input: &str, start: usize) -> Option<Quoted<'_>> {
    let mut chars = input[start..].char_indices();
    let (_, quote) = chars.next()?;
    if quote != '`' && quote != '\'' && quote != '"' {
        return None;
    }

    let mut escaped = false;
    for (offset, c) in chars {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            c if c == quote => {
                let inner = &input[start + quote.len_utf8()..start + offset];
                return Some(Quoted {
                    quote,
                    inner,
                    end: start + offset + quote.len_utf8(),
                });
            }
            _ => {}
        }
    }
    None
}

/// Decide the canonical replacement literal for an occurrence, or `None`
/// when it is already canonical (or outside the known signatures).
fn canonical_form(token: &str, quoted: &Quoted<'_>, terminator: Option<char>) -> Option<String> {
    match (token, terminator) {
        // Credential placeholder in script config. A backticked value is
        // the corruption; the canonical form wipes the placeholder.
        ("apiKey:", Some(',')) if quoted.quote == '`' => Some("''".to_string()),

        // CSS declaration: single quotes are canonical.
        ("content:", Some(';')) if quoted.quote == '`' => {
            Some(format!("'{}'", escape_css_single_quoted(quoted.inner)))
        }

        // Script object property.
        ("content:", Some(',')) => match quoted.quote {
            // A backticked script value holding an apostrophe, an
            // interpolation, an escape, or a newline is legitimately a
            // template literal; only plain values revert to quotes.
            '`' if !quoted.inner.contains('\'')
                && !quoted.inner.contains('\\')
                && !quoted.inner.contains("${")
                && !quoted.inner.contains('\n') =>
            {
                Some(format!("'{}'", escape_js_single_quoted(quoted.inner)))
            }
            // A double-quoted value holding an apostrophe re-breaks as
            // soon as anything converts it to single quotes; the stable
            // canonical form is a template literal.
            '"' if quoted.inner.contains('\'') => {
                Some(format!("`{}`", escape_for_template(quoted.inner)))
            }
            _ => None,
        },

        _ => None,
    }
}

/// Escape a raw source value for a template literal: backticks and `${`
/// must not open syntax. Unlike the generation-time escaper, existing
/// backslash escapes are kept as-is; the value was lifted from a
/// double-quoted literal where they are already valid.
fn escape_for_template(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            _ => out.push(c),
        }
    }
    out
}

fn demo_matcher() -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    builder.add(
        Glob::new("**/demos/*_demo.html")
            .map_err(|e| StackgenError::Schema(format!("invalid demo glob: {}", e)))?,
    );
    builder
        .build()
        .map_err(|e| StackgenError::Schema(format!("invalid demo glob: {}", e)))
}

/// Depth-first walk collecting files that match the demo glob, by path
/// relative to the walk root.
fn collect_files(
    root: &Path,
    dir: &Path,
    matcher: &GlobSet,
    files: &mut Vec<PathBuf>,
) -> Result<()> {
    if !dir.exists() {
        return Ok(());
    }

    let entries = fs::read_dir(dir).map_err(|e| StackgenError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| StackgenError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, &path, matcher, files)?;
        } else if let Ok(relative) = path.strip_prefix(root)
            && matcher.is_match(relative)
        {
            files.push(path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn fixes_corrupted_css_content() {
        let outcome = repair_text("content: ``;");
        assert_eq!(outcome.text, "content: '';");
        assert!(outcome.changed);
    }

    #[test]
    fn fixes_corrupted_css_content_with_value() {
        let outcome = repair_text(".header::before { content: `*`; }");
        assert_eq!(outcome.text, ".header::before { content: '*'; }");
        assert!(outcome.changed);
    }

    #[test]
    fn clean_css_is_untouched() {
        let input = ".header::before { content: ''; }";
        let outcome = repair_text(input);
        assert_eq!(outcome.text, input);
        assert!(!outcome.changed);
    }

    #[test]
    fn fixes_corrupted_api_key_placeholder() {
        let outcome = repair_text("apiKey: ``,");
        assert_eq!(outcome.text, "apiKey: '',");
        assert!(outcome.changed);

        let outcome = repair_text("apiKey: `stale-value`,");
        assert_eq!(outcome.text, "apiKey: '',");
        assert!(outcome.changed);
    }

    #[test]
    fn clean_api_key_is_untouched() {
        let input = "apiKey: '',";
        let outcome = repair_text(input);
        assert_eq!(outcome.text, input);
        assert!(!outcome.changed);
    }

    #[test]
    fn script_template_literal_with_apostrophe_is_legitimate() {
        // A script string that needs its backticks must keep them.
        let input = "content: `I'll help you with that`,";
        let outcome = repair_text(input);
        assert_eq!(outcome.text, input);
        assert!(!outcome.changed);
    }

    #[test]
    fn script_template_literal_without_apostrophe_reverts_to_quotes() {
        let outcome = repair_text("content: `Help me with this task`,");
        assert_eq!(outcome.text, "content: 'Help me with this task',");
        assert!(outcome.changed);
    }

    #[test]
    fn script_interpolation_is_never_rewritten() {
        let input = "content: `Processed ${count} records`,";
        let outcome = repair_text(input);
        assert_eq!(outcome.text, input);
        assert!(!outcome.changed);
    }

    #[test]
    fn double_quoted_script_value_with_apostrophe_becomes_template_literal() {
        let outcome = repair_text(r#"content: "I'll check the status","#);
        assert_eq!(outcome.text, "content: `I'll check the status`,");
        assert!(outcome.changed);
    }

    #[test]
    fn plain_css_properties_are_not_candidates() {
        let input = "justify-content: center;\nalign-content: flex-start;";
        let outcome = repair_text(input);
        assert_eq!(outcome.text, input);
        assert!(!outcome.changed);
    }

    #[test]
    fn unterminated_literal_is_left_alone() {
        let input = "content: `never closes";
        let outcome = repair_text(input);
        assert_eq!(outcome.text, input);
        assert!(!outcome.changed);
    }

    #[test]
    fn repair_is_idempotent() {
        let corrupted = concat!(
            ".x::after { content: ``; }\n",
            "let cfg = { apiKey: `old`, content: `Help me`, };\n",
            "messages: [{ content: \"I'll process that\", }]\n",
        );
        let once = repair_text(corrupted);
        assert!(once.changed);

        let twice = repair_text(&once.text);
        assert_eq!(twice.text, once.text);
        assert!(!twice.changed);
    }

    #[test]
    fn mixed_document_repairs_only_corrupted_occurrences() {
        let input = concat!(
            "content: ''; /* fine */\n",
            "content: ``; /* broken css */\n",
            "content: `I'm a legit template literal`,\n",
            "content: 'plain script string',\n",
        );
        let outcome = repair_text(input);
        assert!(outcome.changed);
        assert!(outcome.text.contains("content: ''; /* fine */"));
        assert!(outcome.text.contains("content: ''; /* broken css */"));
        assert!(outcome.text.contains("content: `I'm a legit template literal`,"));
        assert!(outcome.text.contains("content: 'plain script string',"));
    }

    #[test]
    fn tree_repair_reports_changed_vs_scanned() {
        let temp_dir = TempDir::new().unwrap();
        let demos = temp_dir.path().join("healthcare_stack/x_stack/demos");
        fs::create_dir_all(&demos).unwrap();

        fs::write(demos.join("broken_demo.html"), "content: ``;").unwrap();
        fs::write(demos.join("clean_demo.html"), "content: '';").unwrap();
        // Not a demo page; must be ignored even if corrupted.
        fs::write(temp_dir.path().join("notes.html"), "content: ``;").unwrap();

        let report = repair_tree(temp_dir.path()).unwrap();
        assert_eq!(report.scanned, 2);
        assert_eq!(report.changed, 1);
        assert!(report.errors.is_empty());

        assert_eq!(
            fs::read_to_string(demos.join("broken_demo.html")).unwrap(),
            "content: '';"
        );
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("notes.html")).unwrap(),
            "content: ``;"
        );
    }

    #[test]
    fn tree_repair_tolerates_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let report = repair_tree(&temp_dir.path().join("does_not_exist")).unwrap();
        assert_eq!(report.scanned, 0);
        assert_eq!(report.changed, 0);
    }

    #[test]
    fn generated_pages_are_already_clean() {
        use crate::emit::script::script_for;
        use crate::emit::{emit_chat_demo, emit_form_demo};
        use crate::spec::AgentDescriptor;

        let d = AgentDescriptor {
            name: "care_gap_closure".to_string(),
            display_name: "Care Gap Closure Agent".to_string(),
            description: "Identifies missing screenings".to_string(),
            emoji: "🎯".to_string(),
            systems: vec!["EHR".to_string()],
            benefits: vec!["Improves quality scores".to_string()],
            use_cases: vec!["Preventive care reminders".to_string()],
        };

        let form = emit_form_demo(&d).unwrap();
        assert!(!repair_text(&form).changed);

        let chat = emit_chat_demo(&d, &script_for(&d.name)).unwrap();
        assert!(!repair_text(&chat).changed);
    }
}
