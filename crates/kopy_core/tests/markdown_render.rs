use kopy_core::render_markdown;

fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn plain_text_is_wrapped_in_a_single_paragraph() {
    let html = render_markdown("just some plain prose");
    assert_eq!(html, "<p>just some plain prose</p>");
}

#[test]
fn empty_and_whitespace_only_inputs_render_to_nothing() {
    assert_eq!(render_markdown(""), "");
    assert_eq!(render_markdown("   "), "");
    assert_eq!(render_markdown("\n\n\n"), "");
}

#[test]
fn heading_at_first_line_renders_without_paragraph_wrapper() {
    let html = render_markdown("# Title");
    assert_eq!(html, "<h1>Title</h1>");
    assert!(!html.contains("<p>"));
}

#[test]
fn heading_level_matches_hash_count() {
    assert_eq!(render_markdown("## Two"), "<h2>Two</h2>");
    assert_eq!(render_markdown("###### Deep"), "<h6>Deep</h6>");
}

#[test]
fn seven_hashes_fall_through_to_paragraph() {
    let html = render_markdown("####### TooDeep");
    assert_eq!(html, "<p>####### TooDeep</p>");
}

#[test]
fn heading_without_space_is_not_a_heading() {
    let html = render_markdown("#NoSpace");
    assert_eq!(html, "<p>#NoSpace</p>");
}

#[test]
fn blockquote_line_renders_as_blockquote() {
    let html = render_markdown("> quoted wisdom");
    assert_eq!(html, "<blockquote>quoted wisdom</blockquote>");
}

#[test]
fn bold_and_italic_render_once_each_inside_a_paragraph() {
    let html = render_markdown("**bold** and *italic*");
    assert_eq!(html, "<p><strong>bold</strong> and <em>italic</em></p>");
    assert_eq!(count_occurrences(&html, "<strong>"), 1);
    assert_eq!(count_occurrences(&html, "<em>"), 1);
}

#[test]
fn bold_pairs_are_not_rematched_as_italic() {
    let html = render_markdown("**only bold**");
    assert_eq!(html, "<p><strong>only bold</strong></p>");
    assert!(!html.contains("<em>"));
}

#[test]
fn image_is_not_also_rendered_as_link() {
    let html = render_markdown("![alt](http://x/y.png)");
    assert!(html.contains(r#"alt="alt""#));
    assert!(html.contains(r#"src="http://x/y.png""#));
    assert!(html.contains("<img"));
    assert!(!html.contains("<a "));
}

#[test]
fn link_renders_anchor_with_href() {
    let html = render_markdown("[docs](https://example.com)");
    assert_eq!(
        html,
        r#"<p><a href="https://example.com">docs</a></p>"#
    );
}

#[test]
fn inline_code_renders_code_element() {
    let html = render_markdown("run `cargo doc` locally");
    assert_eq!(html, "<p>run <code>cargo doc</code> locally</p>");
}

#[test]
fn consecutive_bullet_lines_merge_into_one_list() {
    let html = render_markdown("* a\n* b\n* c");
    assert_eq!(count_occurrences(&html, "<ul>"), 1);
    assert_eq!(count_occurrences(&html, "</ul>"), 1);
    assert_eq!(count_occurrences(&html, "<li>"), 3);
    assert!(html.contains("<li>a</li>"));
    assert!(html.contains("<li>c</li>"));
}

#[test]
fn ordered_lines_merge_into_one_ordered_list() {
    let html = render_markdown("1. a\n2. b");
    assert_eq!(count_occurrences(&html, "<ol>"), 1);
    assert_eq!(count_occurrences(&html, "</ol>"), 1);
    assert_eq!(count_occurrences(&html, "<li>"), 2);
}

#[test]
fn lists_separated_by_content_stay_separate() {
    let html = render_markdown("* a\nbetween\n* b");
    assert_eq!(count_occurrences(&html, "<ul>"), 2);
    assert!(html.contains("<p>between</p>"));
}

#[test]
fn unordered_and_ordered_lists_do_not_merge_with_each_other() {
    let html = render_markdown("* a\n1. b");
    assert_eq!(count_occurrences(&html, "<ul>"), 1);
    assert_eq!(count_occurrences(&html, "<ol>"), 1);
}

#[test]
fn list_item_text_is_trimmed() {
    let html = render_markdown("*   padded item");
    assert!(html.contains("<li>padded item</li>"));
}

#[test]
fn inline_rules_apply_inside_block_lines() {
    let html = render_markdown("# A **bold** title");
    assert_eq!(html, "<h1>A <strong>bold</strong> title</h1>");

    let quoted = render_markdown("> see `code` here");
    assert_eq!(quoted, "<blockquote>see <code>code</code> here</blockquote>");
}

#[test]
fn each_line_matches_one_block_rule_only() {
    let html = render_markdown("# Head\n> quote\nplain");
    assert_eq!(count_occurrences(&html, "<h1>"), 1);
    assert_eq!(count_occurrences(&html, "<blockquote>"), 1);
    assert_eq!(count_occurrences(&html, "<p>"), 1);
}

#[test]
fn mixed_document_renders_expected_structure() {
    let source = "# Project Phoenix\n\nThis outlines the plan.\n\n* Research\n* Build\n\n> High priority.";
    let html = render_markdown(source);
    assert!(html.contains("<h1>Project Phoenix</h1>"));
    assert!(html.contains("<p>This outlines the plan.</p>"));
    assert_eq!(count_occurrences(&html, "<ul>"), 1);
    assert_eq!(count_occurrences(&html, "<li>"), 2);
    assert!(html.contains("<blockquote>High priority.</blockquote>"));
}

#[test]
fn unmatched_markdown_degrades_to_literal_text() {
    let html = render_markdown("[orphan bracket and ![half image");
    assert!(html.contains("[orphan bracket"));
    assert!(html.contains("![half image"));
    assert!(!html.contains("<a "));
    assert!(!html.contains("<img"));
}

#[test]
fn rendering_is_single_pass_only() {
    // Idempotence is explicitly not guaranteed; assert the first pass shape
    // without feeding output back in.
    let first = render_markdown("*emphasis*");
    assert_eq!(first, "<p><em>emphasis</em></p>");
}
