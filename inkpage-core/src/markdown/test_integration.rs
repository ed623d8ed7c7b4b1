//! Integration tests for markdown processing

use super::*;
use insta::assert_snapshot;

fn convert(markdown: &str) -> String {
    MarkdownProcessor::new().convert(markdown)
}

#[test]
fn test_inline_math_survives_emphasis_markers() {
    let html = convert("Let $a_1 * b_2 * c$ be *small*.");
    assert_eq!(html, "<p>Let $a_1 * b_2 * c$ be <em>small</em>.</p>");
}

#[test]
fn test_block_math_is_not_wrapped_in_paragraph() {
    let html = convert("Before\n\n$$\n|x| = \\sqrt{x^2} # _not_ markdown\n$$\n\nAfter");
    assert_snapshot!(html, @r###"
    <p>Before</p>
    <div class="math-block">$$
    |x| = \sqrt{x^2} # _not_ markdown
    $$</div>
    <p>After</p>
    "###);
}

#[test]
fn test_math_with_markdown_significant_characters() {
    for formula in ["x_1 + y_1", "a**2", "|a|b|", "# n", "`t`", "[a](b)", "<x>"] {
        let html = convert(&format!("Inline ${}$ here", formula));
        assert!(
            html.contains(&format!("${}$", formula)),
            "formula {:?} was altered: {}",
            formula,
            html
        );
    }
}

#[test]
fn test_math_inside_table_cell_and_list() {
    let html = convert("|f|g|\n|-|-|\n|$a|b$|$c$|\n\n- item $x*y$");
    assert!(html.contains("<td style=\"text-align:left\">$a|b$</td>"));
    assert!(html.contains("<li>item $x*y$</li>"));
}

#[test]
fn test_dollar_amounts_left_alone_across_lines() {
    let html = convert("It costs $5\n\nand $6 later");
    assert_eq!(html, "<p>It costs $5</p>\n<p>and $6 later</p>");
}

#[test]
fn test_full_document() {
    let markdown = r#"# Notes :memo:

> Remember the **milk**

1. first
2. second
- [ ] todo

```python
if a < b:
    print("hi")
```

<div class="aside">raw</div>
---
Closing [link](https://example.com)."#;

    assert_snapshot!(convert(markdown), @r###"
    <h1>Notes 📝</h1>
    <blockquote>Remember the <strong>milk</strong></blockquote>
    <ol><li>first</li><li>second</li></ol>
    <ul><li style="list-style: none;"><input type="checkbox"  disabled style="margin-right: 0.5em;">todo</li></ul>
    <div class="code-block"><pre><code class="language-python">if a &lt; b:
        print("hi")</code></pre></div>
    <div class="aside">raw</div>
    <hr>
    <p>Closing <a href="https://example.com">link</a>.</p>
    "###);
}
