use crate::curl::request::ExampleRequest;

/// Renders a request as a single-line `curl` command.
///
/// Every argument is wrapped in double quotes, so only the characters the
/// shell still interprets inside them are escaped.
pub fn curlify(request: &ExampleRequest) -> String {
    let mut parts: Vec<String> = vec![
        "curl".to_string(),
        "-X".to_string(),
        request.method.to_string(),
        quote(&request.url),
    ];
    for (name, value) in &request.headers {
        parts.push("-H".to_string());
        parts.push(quote(&format!("{}: {}", name, value)));
    }
    if let Some(body) = &request.body {
        parts.push("-d".to_string());
        parts.push(quote(body));
    }
    parts.join(" ")
}

fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
