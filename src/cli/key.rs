//! Key command: shows how a line is matched and deduplicated

use anyhow::{bail, Result};

use super::output::Output;
use crate::domain::{from_text, normalize, task_key, Task};

pub fn show(output: &Output, text: &str) -> Result<()> {
    // A full bullet line is matched as a task; anything else is a description
    let (key, status, style, description) = match Task::from_line(1, text) {
        Some(task) => (task.key, task.status, Some(task.style), task.description),
        None => {
            output.verbose_ctx("key", "Not a task line, treating input as a description");
            let Some(key) = task_key(text) else {
                bail!("No key for {:?}: empty after normalization or a bare status symbol", text);
            };
            (key, from_text(text), None, text.trim().to_string())
        }
    };

    output.verbose_ctx("key", &format!("normalize({:?}) = {:?}", description, normalize(&description)));

    if output.is_json() {
        output.data(&serde_json::json!({
            "input": text,
            "description": description,
            "key": key,
            "status": status,
            "style": style,
        }));
    } else {
        println!("Key:    {}", key);
        println!("Status: {} {}", status.marker(), status.label());
        if let Some(style) = style {
            println!("Style:  {:?}", style);
        }
    }

    Ok(())
}
