//! Statement splitting and tokenizing for command text.
//!
//! Statements end at a newline or an unquoted `;`. Tokens are separated by
//! whitespace; single and double quotes group characters and are removed.
//! A quote left open runs to the end of the text, so `echo "a b` yields the
//! tokens `echo` and `a b`. Separators inside it do not split.

/// Split command text into statements, each a list of tokens.
/// Empty statements are dropped.
pub fn parse_statements(text: &str) -> Vec<Vec<String>> {
    let mut statements = Vec::new();
    let mut tokens: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for ch in text.chars() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            } else {
                current.push(ch);
            }
            continue;
        }

        match ch {
            '\'' | '"' => {
                quote = Some(ch);
                in_token = true;
            }
            ';' | '\n' => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
                if !tokens.is_empty() {
                    statements.push(std::mem::take(&mut tokens));
                }
            }
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_token {
        tokens.push(current);
    }
    if !tokens.is_empty() {
        statements.push(tokens);
    }
    statements
}

/// Replace `$*` with all arguments joined by spaces and `$1`..`$9` with the
/// matching positional argument (empty when missing).
pub fn substitute_args(body: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            out.push(ch);
            continue;
        }
        match chars.peek().copied() {
            Some('*') => {
                chars.next();
                out.push_str(&args.join(" "));
            }
            Some(d @ '1'..='9') => {
                chars.next();
                let index = d as usize - '1' as usize;
                if let Some(arg) = args.get(index) {
                    out.push_str(arg);
                }
            }
            _ => out.push('$'),
        }
    }
    out
}
