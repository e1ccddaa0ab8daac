//! Discord message markup used by the fuel report.

/// `<t:EPOCH:R>`, rendered by the client as "in 3 days".
pub fn relative_timestamp(epoch_secs: i64) -> String {
    format!("<t:{epoch_secs}:R>")
}

/// `<t:EPOCH:f>`, rendered by the client as a local calendar date and time.
pub fn absolute_timestamp(epoch_secs: i64) -> String {
    format!("<t:{epoch_secs}:f>")
}

pub fn bold(text: &str) -> String {
    format!("**{text}**")
}

pub fn underline(text: &str) -> String {
    format!("__{text}__")
}

/// `**<name>** - expires <t:E:R> - <t:E:f>`, underlined as a whole when urgent.
pub fn structure_line(name: &str, epoch_secs: i64, urgent: bool) -> String {
    let line = format!(
        "{} - expires {} - {}",
        bold(name),
        relative_timestamp(epoch_secs),
        absolute_timestamp(epoch_secs)
    );
    if urgent {
        underline(&line)
    } else {
        line
    }
}

/// `**<title> (<label>):**` followed by a blank line.
pub fn report_header(title: &str, label: &str) -> String {
    format!("{}\n\n", bold(&format!("{title} ({label}):")))
}
