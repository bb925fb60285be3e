use serde::Serialize;
use serde_json::Value;

pub struct Styler {
    color_enabled: bool,
}

impl Styler {
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    fn wrap(&self, code: &str, s: &str) -> String {
        if !self.color_enabled {
            return s.to_string();
        }
        format!("{}{}\u{001b}[0m", code, s)
    }

    pub fn green(&self, s: &str) -> String {
        self.wrap("\u{001b}[32m", s)
    }

    pub fn gray(&self, s: &str) -> String {
        self.wrap("\u{001b}[90m", s)
    }

    pub fn bold(&self, s: &str) -> String {
        self.wrap("\u{001b}[1m", s)
    }

    /// Unlocked/locked or visited/unvisited marker.
    pub fn flag(&self, on: bool, yes: &str, no: &str) -> String {
        if on {
            self.green(yes)
        } else {
            self.gray(no)
        }
    }
}

/// Display columns for `s`, ignoring ANSI escapes. Emoji and CJK count as 2.
pub fn display_width(s: &str) -> usize {
    let mut width = 0;
    let mut in_escape = false;
    for c in s.chars() {
        if in_escape {
            if c == 'm' {
                in_escape = false;
            }
            continue;
        }
        if c == '\u{001b}' {
            in_escape = true;
            continue;
        }
        width += if is_wide_char(c) { 2 } else { 1 };
    }
    width
}

fn is_wide_char(c: char) -> bool {
    let cp = c as u32;
    (0x1100..=0x115F).contains(&cp)
        || (0x2E80..=0xA4CF).contains(&cp)
        || (0xAC00..=0xD7A3).contains(&cp)
        || (0xF900..=0xFAFF).contains(&cp)
        || (0xFF00..=0xFF60).contains(&cp)
        || (0x1F300..=0x1FAFF).contains(&cp)
}

fn pad_right(s: &str, width: usize) -> String {
    let dw = display_width(s);
    if dw >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - dw))
    }
}

/// Column-aligned plain-text table.
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<String>) -> &mut Self {
        self.rows.push(cells);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| display_width(h)).collect();
        for row in self.rows.iter() {
            for (i, cell) in row.iter().enumerate() {
                let w = display_width(cell);
                match widths.get_mut(i) {
                    Some(cur) => *cur = (*cur).max(w),
                    None => widths.push(w),
                }
            }
        }

        let line = |cells: &[String]| {
            let last = cells.len().saturating_sub(1);
            cells
                .iter()
                .enumerate()
                .map(|(i, c)| if i == last { c.clone() } else { pad_right(c, widths[i]) })
                .collect::<Vec<String>>()
                .join("  ")
        };

        let mut out = vec![line(self.headers.as_slice())];
        out.extend(self.rows.iter().map(|r| line(r.as_slice())));
        out.join("\n")
    }
}

fn sort_keys(v: &mut Value) {
    match v {
        Value::Array(items) => items.iter_mut().for_each(sort_keys),
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = std::mem::take(map).into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            for (k, mut child) in entries {
                sort_keys(&mut child);
                map.insert(k, child);
            }
        }
        _ => {}
    }
}

/// Pretty JSON with object keys in sorted order at every depth.
pub fn stable_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut v = serde_json::to_value(value)?;
    sort_keys(&mut v);
    serde_json::to_string_pretty(&v)
}
