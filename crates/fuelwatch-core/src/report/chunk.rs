use tracing::debug;

/// Message length as the chat platform counts it (Unicode scalar values).
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Pack `lines` into messages of at most `max_len` characters.
///
/// The first message starts with `header`. Each line is followed by `\n`
/// and never split; when the next line would overflow the current message,
/// that message is closed and a new one (without header) begins. Callers
/// must make sure every `line + "\n"` fits into `max_len` on its own.
///
/// No lines means no messages, the header is never sent alone at the end.
pub fn chunk_lines<'a, I>(header: &str, lines: I, max_len: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut chunks = Vec::new();
    let mut buffer = header.to_string();
    let mut buffer_len = char_len(header);
    let mut any_line = false;

    for line in lines {
        let line_len = char_len(line) + 1;
        if !buffer.is_empty() && buffer_len + line_len > max_len {
            debug!(chars = buffer_len, "closing message chunk");
            chunks.push(std::mem::take(&mut buffer));
            buffer_len = 0;
        }
        buffer.push_str(line);
        buffer.push('\n');
        buffer_len += line_len;
        any_line = true;
    }

    if any_line && !buffer.is_empty() {
        debug!(chars = buffer_len, "closing final message chunk");
        chunks.push(buffer);
    }
    chunks
}
