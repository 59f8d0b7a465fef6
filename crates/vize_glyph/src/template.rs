//! High-performance template formatting for Vue markup.
//!
//! This module provides formatting for Vue template blocks,
//! handling proper indentation and attribute formatting.
//! Uses byte operations and SIMD-accelerated search for maximum performance.

use crate::error::FormatError;
use crate::options::FormatOptions;
use memchr::{memchr, memchr2, memmem};

/// A parsed opening tag borrowed from the source.
struct OpeningTag<'a> {
    name: &'a [u8],
    attrs: Vec<&'a [u8]>,
    is_self_closing: bool,
    end: usize,
}

/// Format Vue template content
#[inline]
pub fn format_template_content(
    source: &str,
    options: &FormatOptions,
) -> Result<String, FormatError> {
    let bytes = source.as_bytes();

    // Fast path: find first non-whitespace byte
    let start = bytes.iter().position(|&b| !is_whitespace(b));
    if start.is_none() {
        return Ok(String::new());
    }

    let formatter = TemplateFormatter::new(options);
    formatter.format(bytes)
}

/// High-performance template formatter using byte operations
struct TemplateFormatter<'a> {
    options: &'a FormatOptions,
    indent: &'static [u8],
    newline: &'static [u8],
}

impl<'a> TemplateFormatter<'a> {
    #[inline]
    fn new(options: &'a FormatOptions) -> Self {
        Self {
            options,
            indent: options.indent_bytes(),
            newline: options.newline_bytes(),
        }
    }

    fn format(&self, source: &[u8]) -> Result<String, FormatError> {
        let len = source.len();
        let reflow = self.options.reflows_text();

        // Pre-allocate output buffer
        let mut output = Vec::with_capacity(len + len / 4);

        let mut pos = 0;
        let mut open_elements: Vec<&[u8]> = Vec::new();
        let mut line_buffer = Vec::with_capacity(256);

        while pos < len {
            // Skip whitespace at line start
            while pos < len && is_whitespace(source[pos]) && source[pos] != b'\n' {
                pos += 1;
            }

            if pos >= len {
                break;
            }

            // Handle newlines
            if source[pos] == b'\n' {
                if !reflow && !line_buffer.is_empty() {
                    self.write_indented_line(&mut output, &line_buffer, open_elements.len());
                    line_buffer.clear();
                }
                pos += 1;
                continue;
            }

            if source[pos] == b'<' {
                // Comments go on their own line, untouched
                if source[pos..].starts_with(b"<!--") {
                    let body = &source[pos + 4..];
                    let end = memmem::find(body, b"-->").ok_or_else(|| {
                        FormatError::TemplateParseError("Unterminated comment".to_string())
                    })?;
                    let comment_end = pos + 4 + end + 3;

                    self.flush_line(&mut output, &mut line_buffer, open_elements.len());
                    self.write_indented_line(
                        &mut output,
                        &source[pos..comment_end],
                        open_elements.len(),
                    );
                    pos = comment_end;
                    continue;
                }

                // Check for closing tag
                if pos + 1 < len && source[pos + 1] == b'/' {
                    if let Some((tag_name, end_pos)) = self.parse_closing_tag(source, pos)? {
                        self.flush_line(&mut output, &mut line_buffer, open_elements.len());

                        match open_elements.pop() {
                            Some(open) if open.eq_ignore_ascii_case(tag_name) => {}
                            Some(open) => {
                                return Err(FormatError::TemplateFormatError(format!(
                                    "Unexpected closing tag </{}>, expected </{}>",
                                    lossy(tag_name),
                                    lossy(open)
                                )));
                            }
                            None => {
                                return Err(FormatError::TemplateFormatError(format!(
                                    "Unexpected closing tag </{}>",
                                    lossy(tag_name)
                                )));
                            }
                        }

                        self.write_indent(&mut output, open_elements.len());
                        output.extend_from_slice(b"</");
                        output.extend_from_slice(tag_name);
                        output.push(b'>');
                        output.extend_from_slice(self.newline);
                        pos = end_pos;
                        continue;
                    }
                }

                // Parse opening tag
                if let Some(tag) = self.parse_opening_tag(source, pos)? {
                    self.flush_line(&mut output, &mut line_buffer, open_elements.len());

                    let depth = open_elements.len();
                    let (opening, multiline) = self.render_opening_tag(&tag, depth);

                    self.write_indent(&mut output, depth);
                    output.extend_from_slice(&opening);

                    if tag.is_self_closing || is_void_element(tag.name) {
                        output.extend_from_slice(self.newline);
                        pos = tag.end;
                        continue;
                    }

                    // Keep `<tag>text</tag>` on one line when it fits
                    if !multiline {
                        if let Some((text, end_pos)) = self.inline_text_child(source, &tag) {
                            let width = self.indent.len() * depth
                                + opening.len()
                                + text.len()
                                + tag.name.len()
                                + 3;
                            if width <= self.options.print_width as usize {
                                output.extend_from_slice(&text);
                                output.extend_from_slice(b"</");
                                output.extend_from_slice(tag.name);
                                output.push(b'>');
                                output.extend_from_slice(self.newline);
                                pos = end_pos;
                                continue;
                            }
                        }
                    }

                    output.extend_from_slice(self.newline);
                    open_elements.push(tag.name);
                    pos = tag.end;
                    continue;
                }
            }

            // Accumulate text content until newline or tag.
            // A `<` that did not start a tag is plain text.
            let content_start = pos;
            if source[pos] == b'<' {
                pos += 1;
            }
            while pos < len && source[pos] != b'\n' && source[pos] != b'<' {
                pos = skip_interpolation(source, pos).unwrap_or(pos + 1);
            }

            // Trim trailing whitespace from content
            let mut content_end = pos;
            while content_end > content_start && is_whitespace(source[content_end - 1]) {
                content_end -= 1;
            }

            if content_end > content_start {
                push_text(&mut line_buffer, &source[content_start..content_end], reflow);
            }
        }

        // Flush remaining content
        self.flush_line(&mut output, &mut line_buffer, open_elements.len());

        if let Some(unclosed) = open_elements.last() {
            return Err(FormatError::TemplateFormatError(format!(
                "Unclosed element <{}>",
                lossy(unclosed)
            )));
        }

        // Remove trailing newline for consistency
        while output.last().is_some_and(|&b| b == b'\n' || b == b'\r') {
            output.pop();
        }

        String::from_utf8(output).map_err(|e| FormatError::TemplateFormatError(e.to_string()))
    }

    #[inline]
    fn write_indent(&self, output: &mut Vec<u8>, depth: usize) {
        for _ in 0..depth {
            output.extend_from_slice(self.indent);
        }
    }

    #[inline]
    fn write_indented_line(&self, output: &mut Vec<u8>, content: &[u8], depth: usize) {
        self.write_indent(output, depth);
        output.extend_from_slice(content);
        output.extend_from_slice(self.newline);
    }

    #[inline]
    fn flush_line(&self, output: &mut Vec<u8>, line_buffer: &mut Vec<u8>, depth: usize) {
        if !line_buffer.is_empty() {
            self.write_indented_line(output, line_buffer, depth);
            line_buffer.clear();
        }
    }

    /// Render an opening tag without leading indentation or trailing newline.
    /// Returns the bytes and whether attributes were broken across lines.
    fn render_opening_tag(&self, tag: &OpeningTag<'_>, depth: usize) -> (Vec<u8>, bool) {
        let close: &[u8] = if tag.is_self_closing { b" />" } else { b">" };
        let single_len = self.indent.len() * depth
            + 1
            + tag.name.len()
            + tag.attrs.iter().map(|a| a.len() + 1).sum::<usize>()
            + close.len();

        let multiline = !tag.attrs.is_empty()
            && (single_len > self.options.print_width as usize
                || (self.options.single_attribute_per_line && tag.attrs.len() > 1));

        let mut out = Vec::with_capacity(single_len + tag.attrs.len() * 8);
        out.push(b'<');
        out.extend_from_slice(tag.name);

        if multiline {
            for attr in &tag.attrs {
                out.extend_from_slice(self.newline);
                self.write_indent(&mut out, depth + 1);
                out.extend_from_slice(attr);
            }
            if self.options.bracket_same_line {
                out.extend_from_slice(close);
            } else {
                out.extend_from_slice(self.newline);
                self.write_indent(&mut out, depth);
                out.extend_from_slice(close.trim_ascii_start());
            }
        } else {
            for attr in &tag.attrs {
                out.push(b' ');
                out.extend_from_slice(attr);
            }
            out.extend_from_slice(close);
        }

        (out, multiline)
    }

    /// If the element's only child is text (or nothing), return the laid-out
    /// text and the position after the matching closing tag.
    fn inline_text_child(&self, source: &[u8], tag: &OpeningTag<'_>) -> Option<(Vec<u8>, usize)> {
        let mut lt = tag.end;
        loop {
            lt += memchr2(b'<', b'{', &source[lt..])?;
            if source[lt] == b'<' {
                break;
            }
            lt = skip_interpolation(source, lt).unwrap_or(lt + 1);
        }
        if source.get(lt + 1) != Some(&b'/') {
            return None;
        }
        let (closing_name, end_pos) = self.parse_closing_tag(source, lt).ok()??;
        if !closing_name.eq_ignore_ascii_case(tag.name) {
            return None;
        }

        let raw = &source[tag.end..lt];
        let mut text = Vec::with_capacity(raw.len());
        if self.options.reflows_text() {
            push_text(&mut text, raw, true);
        } else {
            let trimmed = raw.trim_ascii();
            if memchr(b'\n', trimmed).is_some() {
                return None;
            }
            text.extend_from_slice(trimmed);
        }

        Some((text, end_pos))
    }

    /// Parse an opening tag starting at `<`.
    ///
    /// Returns `Ok(None)` when the `<` does not start a tag.
    fn parse_opening_tag<'b>(
        &self,
        source: &'b [u8],
        start: usize,
    ) -> Result<Option<OpeningTag<'b>>, FormatError> {
        let len = source.len();
        let mut pos = start + 1; // Skip '<'

        // Parse tag name
        let tag_start = pos;
        while pos < len && is_tag_name_char(source[pos]) {
            pos += 1;
        }

        if pos == tag_start || !source[tag_start].is_ascii_alphabetic() {
            return Ok(None);
        }

        let tag_name = &source[tag_start..pos];

        // Parse attributes
        let mut attrs = Vec::new();
        let mut is_self_closing = false;

        loop {
            // Skip whitespace
            while pos < len && is_whitespace(source[pos]) {
                pos += 1;
            }

            if pos >= len {
                return Err(FormatError::TemplateParseError(format!(
                    "Unterminated opening tag <{}>",
                    lossy(tag_name)
                )));
            }

            if source[pos] == b'>' {
                pos += 1;
                break;
            }

            // Check for self-closing end
            if source[pos] == b'/' && source.get(pos + 1) == Some(&b'>') {
                is_self_closing = true;
                pos += 2;
                break;
            }

            // Parse attribute
            let attr_start = pos;
            let mut quote: Option<u8> = None;

            while pos < len {
                let b = source[pos];

                if let Some(q) = quote {
                    if b == q {
                        quote = None;
                    }
                    pos += 1;
                } else if b == b'"' || b == b'\'' {
                    quote = Some(b);
                    pos += 1;
                } else if is_whitespace(b)
                    || b == b'>'
                    || (b == b'/' && source.get(pos + 1) == Some(&b'>'))
                {
                    break;
                } else {
                    pos += 1;
                }
            }

            if quote.is_some() {
                return Err(FormatError::TemplateParseError(format!(
                    "Unterminated attribute value in <{}>",
                    lossy(tag_name)
                )));
            }

            attrs.push(&source[attr_start..pos]);
        }

        Ok(Some(OpeningTag {
            name: tag_name,
            attrs,
            is_self_closing,
            end: pos,
        }))
    }

    /// Parse a closing tag, returns (tag_name, end_pos)
    fn parse_closing_tag<'b>(
        &self,
        source: &'b [u8],
        start: usize,
    ) -> Result<Option<(&'b [u8], usize)>, FormatError> {
        let len = source.len();
        let mut pos = start + 2; // Skip '</'

        // Parse tag name
        let tag_start = pos;
        while pos < len && is_tag_name_char(source[pos]) {
            pos += 1;
        }

        if pos == tag_start {
            return Ok(None);
        }

        let tag_name = &source[tag_start..pos];

        // Skip whitespace and find '>'
        match memchr(b'>', &source[pos..]) {
            Some(offset) => Ok(Some((tag_name, pos + offset + 1))),
            None => Err(FormatError::TemplateParseError(format!(
                "Unterminated closing tag </{}>",
                lossy(tag_name)
            ))),
        }
    }
}

/// If a `{{ }}` interpolation starts at `pos`, return the position after its `}}`.
/// Markup characters inside an interpolation are expression text.
#[inline]
fn skip_interpolation(source: &[u8], pos: usize) -> Option<usize> {
    if !source[pos..].starts_with(b"{{") {
        return None;
    }
    let end = memmem::find(&source[pos + 2..], b"}}")?;
    Some(pos + 2 + end + 2)
}

/// Append a text segment to the line buffer, collapsing whitespace when reflowing.
fn push_text(buffer: &mut Vec<u8>, text: &[u8], reflow: bool) {
    if reflow {
        for word in text.split(|&b| is_whitespace(b)).filter(|w| !w.is_empty()) {
            if !buffer.is_empty() {
                buffer.push(b' ');
            }
            buffer.extend_from_slice(word);
        }
    } else {
        if !buffer.is_empty() {
            buffer.push(b' ');
        }
        buffer.extend_from_slice(text);
    }
}

#[inline]
fn lossy(bytes: &[u8]) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Check if a byte is a valid tag name character
#[inline(always)]
fn is_tag_name_char(b: u8) -> bool {
    matches!(b, b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b':' | b'.')
}

/// Check if a byte is whitespace
#[inline(always)]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Check if an element is a void element (self-closing in HTML)
#[inline]
fn is_void_element(tag: &[u8]) -> bool {
    // Fast path for common cases
    match tag.len() {
        2 => tag.eq_ignore_ascii_case(b"br") || tag.eq_ignore_ascii_case(b"hr"),
        3 => {
            tag.eq_ignore_ascii_case(b"img")
                || tag.eq_ignore_ascii_case(b"col")
                || tag.eq_ignore_ascii_case(b"wbr")
        }
        4 => {
            tag.eq_ignore_ascii_case(b"area")
                || tag.eq_ignore_ascii_case(b"base")
                || tag.eq_ignore_ascii_case(b"meta")
                || tag.eq_ignore_ascii_case(b"link")
        }
        5 => {
            tag.eq_ignore_ascii_case(b"embed")
                || tag.eq_ignore_ascii_case(b"input")
                || tag.eq_ignore_ascii_case(b"param")
                || tag.eq_ignore_ascii_case(b"track")
        }
        6 => tag.eq_ignore_ascii_case(b"source"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::WhitespaceSensitivity;

    fn format(source: &str) -> String {
        format_template_content(source, &FormatOptions::default()).unwrap()
    }

    fn format_ignore(source: &str) -> String {
        format_template_content(source, &FormatOptions::snippet()).unwrap()
    }

    #[test]
    fn test_format_simple_template() {
        assert_eq!(format("<div>Hello</div>"), "<div>Hello</div>");
    }

    #[test]
    fn test_format_nested_template() {
        let result = format("<div><span>Hello</span></div>");
        assert_eq!(result, "<div>\n  <span>Hello</span>\n</div>");
    }

    #[test]
    fn test_format_with_attributes() {
        let result = format(r#"<div class="container"   id="main">Content</div>"#);
        assert_eq!(result, r#"<div class="container" id="main">Content</div>"#);
    }

    #[test]
    fn test_format_self_closing() {
        let result = format("<template><my-input placeholder=\"Name\" /></template>");
        assert_eq!(result, "<template>\n  <my-input placeholder=\"Name\" />\n</template>");
    }

    #[test]
    fn test_void_element_does_not_nest() {
        let result = format("<div><input type=\"text\"><span>after</span></div>");
        assert_eq!(
            result,
            "<div>\n  <input type=\"text\">\n  <span>after</span>\n</div>"
        );
    }

    #[test]
    fn test_empty_element_stays_inline() {
        assert_eq!(format("<section>\n\n</section>"), "<section></section>");
    }

    #[test]
    fn test_long_text_breaks_out_of_line() {
        let options = FormatOptions {
            print_width: 20,
            ..FormatOptions::default()
        };
        let result =
            format_template_content("<p>This text is rather long</p>", &options).unwrap();
        assert_eq!(result, "<p>\n  This text is rather long\n</p>");
    }

    #[test]
    fn test_attributes_break_past_print_width() {
        let options = FormatOptions {
            print_width: 30,
            ..FormatOptions::default()
        };
        let source = r#"<my-button size="large" variant="primary" disabled />"#;
        let result = format_template_content(source, &options).unwrap();
        assert_eq!(
            result,
            "<my-button\n  size=\"large\"\n  variant=\"primary\"\n  disabled\n/>"
        );
    }

    #[test]
    fn test_single_attribute_per_line_bracket_same_line() {
        let options = FormatOptions {
            single_attribute_per_line: true,
            bracket_same_line: true,
            ..FormatOptions::default()
        };
        let result = format_template_content(r#"<a href="/x" target="_blank">Go</a>"#, &options)
            .unwrap();
        assert_eq!(result, "<a\n  href=\"/x\"\n  target=\"_blank\">\n  Go\n</a>");
    }

    #[test]
    fn test_slash_inside_unquoted_attribute() {
        let result = format("<a href=/docs/intro>Docs</a>");
        assert_eq!(result, "<a href=/docs/intro>Docs</a>");
    }

    #[test]
    fn test_ignore_whitespace_reflows_text() {
        let source = "<p>\n  Hello\n     brave   new\n  world\n</p>";
        assert_eq!(format_ignore(source), "<p>Hello brave new world</p>");
    }

    #[test]
    fn test_css_whitespace_keeps_text_lines() {
        let source = "<p>\n  Hello\n  world\n</p>";
        let options = FormatOptions {
            html_whitespace_sensitivity: WhitespaceSensitivity::Css,
            ..FormatOptions::default()
        };
        let result = format_template_content(source, &options).unwrap();
        assert_eq!(result, "<p>\n  Hello\n  world\n</p>");
    }

    #[test]
    fn test_comment_on_own_line() {
        let result = format("<div><!-- note --><span>x</span></div>");
        assert_eq!(result, "<div>\n  <!-- note -->\n  <span>x</span>\n</div>");
    }

    #[test]
    fn test_stray_angle_bracket_is_text() {
        let result = format("<div>\n  a < b\n  <span>x</span>\n</div>");
        assert_eq!(result, "<div>\n  a < b\n  <span>x</span>\n</div>");
    }

    #[test]
    fn test_interpolation_text() {
        let result = format_ignore("<div><span>{{ count }}</span> items</div>");
        assert_eq!(result, "<div>\n  <span>{{ count }}</span>\n  items\n</div>");
    }

    #[test]
    fn test_interpolation_with_angle_brackets() {
        let result = format_ignore("<template><p>{{ a<b ? 1 : 2 }}</p></template>");
        assert_eq!(result, "<template>\n  <p>{{ a<b ? 1 : 2 }}</p>\n</template>");

        let result = format_ignore("<span>Total: {{ n > 1 ? '<b>' + n : '</b>' }}</span>");
        assert_eq!(result, "<span>Total: {{ n > 1 ? '<b>' + n : '</b>' }}</span>");
    }

    #[test]
    fn test_interpolation_before_sibling_element() {
        let result = format("<div>\n  {{ x<y }}\n  <span>x</span>\n</div>");
        assert_eq!(result, "<div>\n  {{ x<y }}\n  <span>x</span>\n</div>");
    }

    #[test]
    fn test_unterminated_interpolation_is_text() {
        assert_eq!(format("<p>{{ open</p>"), "<p>{{ open</p>");
    }

    #[test]
    fn test_mismatched_closing_tag_is_error() {
        let err = format_template_content("<div><span></div>", &FormatOptions::default())
            .unwrap_err();
        assert_eq!(
            err,
            FormatError::TemplateFormatError(
                "Unexpected closing tag </div>, expected </span>".to_string()
            )
        );
    }

    #[test]
    fn test_unclosed_element_is_error() {
        let err = format_template_content("<div><p>text</p>", &FormatOptions::default())
            .unwrap_err();
        assert!(matches!(err, FormatError::TemplateFormatError(_)));
    }

    #[test]
    fn test_unterminated_tag_is_error() {
        let err = format_template_content("<div class=\"a", &FormatOptions::default())
            .unwrap_err();
        assert!(matches!(err, FormatError::TemplateParseError(_)));
    }

    #[test]
    fn test_whitespace_only() {
        assert_eq!(format("  \n\t "), "");
    }

    #[test]
    fn test_void_elements() {
        assert!(is_void_element(b"br"));
        assert!(is_void_element(b"img"));
        assert!(is_void_element(b"input"));
        assert!(is_void_element(b"BR")); // Case insensitive
        assert!(!is_void_element(b"div"));
        assert!(!is_void_element(b"span"));
    }

    #[test]
    fn test_is_tag_name_char() {
        assert!(is_tag_name_char(b'a'));
        assert!(is_tag_name_char(b'Z'));
        assert!(is_tag_name_char(b'0'));
        assert!(is_tag_name_char(b'-'));
        assert!(is_tag_name_char(b'_'));
        assert!(!is_tag_name_char(b' '));
        assert!(!is_tag_name_char(b'>'));
    }
}
