#[macro_export]
macro_rules! relative_file {
    ($f : expr) => {{
        let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        base.join($f)
    }};
}

#[macro_export]
macro_rules! kinds_of {
    ($tokens : expr) => {{
        $tokens.iter().map(|t| t.kind).collect::<Vec<_>>()
    }};
}

#[macro_export]
macro_rules! lexemes_of {
    ($tokens : expr) => {{
        $tokens.iter().map(|t| t.lexeme).collect::<Vec<&str>>()
    }};
}

#[macro_export]
macro_rules! object_of {
    ($($k : expr => $v : expr),* $(,)?) => {{
        let mut map = indexmap::IndexMap::new();
        $(map.insert($k.to_string(), $v);)*
        $crate::JsonValue::Object(map)
    }};
}
