use std::fmt;
use std::str::FromStr;

use txsemantics::{ArgumentKind, ArgumentNode, ArgumentValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            other => Err(format!("Unsupported output format '{other}'")),
        }
    }
}

/// One block per action: the action name, then every labeled slot.
///
/// Slots marked ignore are left out; slots without a label show their position.
pub fn render_text(actions: &[ArgumentNode]) -> String {
    let mut out = String::new();
    for (i, action) in actions.iter().enumerate() {
        let ArgumentValue::Nodes(slots) = &action.payload else {
            out.push_str(&format!("Action {i}: {}\n", action.payload));
            continue;
        };

        let name = slots
            .first()
            .map(|s| s.payload.to_string())
            .unwrap_or_else(|| "empty".to_string());
        out.push_str(&format!("Action {i}: {name}\n"));

        for (n, slot) in slots.iter().enumerate().skip(1) {
            if slot.kind == ArgumentKind::Ignore {
                continue;
            }
            match &slot.label {
                Some(label) => out.push_str(&format!("  {label}: {}\n", slot.payload)),
                None => out.push_str(&format!("  slot{n}: {}\n", slot.payload)),
            }
        }
    }
    out
}
