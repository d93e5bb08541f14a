/// A `{{Name|positional|key=value}}` invocation found in wikitext
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub params: Vec<Param>,
    start: usize,
}

/// One pipe-separated template argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub key: Option<String>,
    pub value: String,
}

impl Template {
    /// MediaWiki name comparison: surrounding whitespace is ignored, `_` equals
    /// a space, and only the first letter is case-insensitive.
    pub fn name_matches(&self, name: &str) -> bool {
        normalize_name(&self.name) == normalize_name(name)
    }

    /// Value of a named parameter; the last occurrence wins
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .rev()
            .find(|param| param.key.as_deref() == Some(key))
            .map(|param| param.value.as_str())
    }
}

/// Collect every template in `text`, nested ones included, in order of
/// appearance. Pipes and `=` only split arguments at the template's own depth,
/// so values holding nested templates or `[[link|label]]` stay intact.
/// Unterminated templates are dropped.
pub fn scan_templates(text: &str) -> Vec<Template> {
    let bytes = text.as_bytes();
    let mut open: Vec<Frame> = Vec::new();
    let mut found = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let rest = &bytes[i..];

        if rest.starts_with(b"{{") {
            open.push(Frame::new(i));
            i += 2;
            continue;
        }

        if let Some(frame) = open.last_mut() {
            if rest.starts_with(b"}}") && frame.link_depth == 0 {
                if let Some(frame) = open.pop() {
                    found.push(frame.finish(text, i));
                }
                i += 2;
                continue;
            }

            if rest.starts_with(b"[[") {
                frame.link_depth += 1;
                i += 2;
                continue;
            }

            if rest.starts_with(b"]]") && frame.link_depth > 0 {
                frame.link_depth -= 1;
                i += 2;
                continue;
            }

            if frame.link_depth == 0 {
                match bytes[i] {
                    b'|' => frame.split_at(i),
                    b'=' => frame.mark_equals(i),
                    _ => {}
                }
            }
        }

        i += 1;
    }

    found.sort_by_key(|template| template.start);
    found
}

struct Frame {
    start: usize,
    /// Byte ranges of each argument segment, plus the first top-level `=` in it
    segments: Vec<(usize, Option<usize>)>,
    link_depth: usize,
}

impl Frame {
    fn new(start: usize) -> Self {
        Self {
            start,
            segments: vec![(start + 2, None)],
            link_depth: 0,
        }
    }

    fn split_at(&mut self, pipe: usize) {
        self.segments.push((pipe + 1, None));
    }

    fn mark_equals(&mut self, at: usize) {
        // The template name segment never carries a key
        if self.segments.len() < 2 {
            return;
        }
        if let Some(last) = self.segments.last_mut() {
            if last.1.is_none() {
                last.1 = Some(at);
            }
        }
    }

    fn finish(self, text: &str, end: usize) -> Template {
        let mut bounds: Vec<usize> = self.segments.iter().skip(1).map(|(from, _)| from - 1).collect();
        bounds.push(end);

        let name = text[self.segments[0].0..bounds[0]].trim().to_string();

        let params = self
            .segments
            .iter()
            .skip(1)
            .zip(bounds.iter().skip(1))
            .map(|(&(from, equals), &to)| match equals {
                Some(eq) => Param {
                    key: Some(text[from..eq].trim().to_string()),
                    value: text[eq + 1..to].to_string(),
                },
                None => Param {
                    key: None,
                    value: text[from..to].to_string(),
                },
            })
            .collect();

        Template {
            name,
            params,
            start: self.start,
        }
    }
}

fn normalize_name(name: &str) -> String {
    let name = name.trim().replace('_', " ");
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
