// Fixture manifest builders

pub fn manifest_json(name: &str, version: &str, resolvers: &[&str]) -> String {
    serde_json::json!({
        "name": name,
        "version": version,
        "resolvers": resolvers,
    })
    .to_string()
}

pub fn manifest_yaml(name: &str, version: &str, resolvers: &[&str]) -> String {
    let mut text = format!("name: {name}\nversion: \"{version}\"\n");
    if !resolvers.is_empty() {
        text.push_str("resolvers:\n");
        for resolver in resolvers {
            text.push_str(&format!("  - {resolver}\n"));
        }
    }
    text
}
