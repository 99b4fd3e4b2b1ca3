#[macro_export]
macro_rules! path {
    ($($segment:expr),+ $(,)?) => {{
        let mut path = std::path::PathBuf::new();
        $(path.push($segment);)+
        path
    }};
}
