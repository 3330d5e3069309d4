use serde_json::Value;

/// Walk `doc` along a dot-separated `path`.
///
/// An empty or blank path returns the document itself. All-digit segments
/// index into arrays; every other step is an object key lookup. Anything
/// missing along the way yields `Value::Null`.
pub fn extract_by_path(doc: &Value, path: &str) -> Value {
    if path.trim().is_empty() {
        return doc.clone();
    }
    let mut current = doc;
    for segment in path.split('.') {
        let next = match current {
            Value::Array(items) if is_index(segment) => {
                segment.parse::<usize>().ok().and_then(|i| items.get(i))
            }
            Value::Object(map) => map.get(segment),
            _ => None,
        };
        match next {
            Some(value) => current = value,
            None => return Value::Null,
        }
    }
    current.clone()
}

fn is_index(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}
