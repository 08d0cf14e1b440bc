//! Tag serialization helpers.
//!
//! Text content and attribute values are escaped here; composers pass raw
//! text and pre-rendered children.

pub fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

fn class_attr(class: Option<&str>) -> String {
    match class {
        Some(class) if !class.is_empty() => format!(" class=\"{}\"", escape_attr(class)),
        _ => String::new(),
    }
}

/// `<tag class="…">inner</tag>`; `inner` is inserted verbatim.
pub fn element(tag: &str, class: Option<&str>, inner: &str) -> String {
    format!("<{tag}{}>{inner}</{tag}>", class_attr(class))
}

/// Element with escaped text content.
pub fn text_element(tag: &str, class: Option<&str>, text: &str) -> String {
    element(tag, class, &escape_text(text))
}

/// Element with extra attributes placed before the class.
pub fn element_with_attrs(
    tag: &str,
    attrs: &[(&str, String)],
    class: Option<&str>,
    inner: &str,
) -> String {
    format!("<{tag}{}{}>{inner}</{tag}>", attrs_string(attrs), class_attr(class))
}

/// Self-closing element such as `<hr />`.
pub fn void_element(tag: &str, attrs: &[(&str, String)], class: Option<&str>) -> String {
    format!("<{tag}{}{} />", attrs_string(attrs), class_attr(class))
}

fn attrs_string(attrs: &[(&str, String)]) -> String {
    attrs
        .iter()
        .map(|(name, value)| format!(" {name}=\"{}\"", escape_attr(value)))
        .collect()
}
