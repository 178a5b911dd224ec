use settings_rs_core::{SettingsTree, Value};

/// Build a tree from `(key, value)` pairs.
pub fn tree<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> SettingsTree
where
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

/// `{ app: { name, version, debug, ports }, database: { host, port } }`.
pub fn app_tree() -> SettingsTree {
    tree([
        (
            "app",
            Value::Map(tree([
                ("name", Value::from("MyApp")),
                ("version", Value::from("1.0")),
                ("debug", Value::from(false)),
                (
                    "ports",
                    Value::List(vec![Value::from(80), Value::from(443)]),
                ),
            ])),
        ),
        (
            "database",
            Value::Map(tree([
                ("host", Value::from("localhost")),
                ("port", Value::from(5432)),
            ])),
        ),
    ])
}

/// Literal dotted keys with no nested structure.
pub fn flat_tree() -> SettingsTree {
    tree([("app.name", "Settings app"), ("app.version", "1.0")])
}
