pub mod models;
pub mod selection;

pub use models::{Category, ClearMode};

/// 类别显示名称，无法识别的标识原样返回
pub fn label(id: &str) -> String {
    Category::from_id(id)
        .map(|c| c.label().to_string())
        .unwrap_or_else(|| id.to_string())
}

/// 拼接类别名称用于状态显示
pub fn join_labels(categories: &[Category]) -> String {
    categories
        .iter()
        .map(|c| c.label())
        .collect::<Vec<_>>()
        .join("、")
}

/// 某模式下实际需要清理的类别
pub fn applicable(mode: ClearMode, selected: &[Category]) -> Vec<Category> {
    match mode {
        ClearMode::All => Category::ALL.to_vec(),
        ClearMode::Selected => Category::ALL
            .into_iter()
            .filter(|c| selected.contains(c))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_falls_back_to_raw_identifier() {
        assert_eq!(label("cookies"), "Cookies");
        assert_eq!(label("downloads"), "downloads");
    }

    #[test]
    fn join_labels_uses_ideographic_comma() {
        assert_eq!(
            join_labels(&[Category::Cookies, Category::Storage]),
            "Cookies、本地存储"
        );
    }

    #[test]
    fn applicable_expands_all_and_keeps_registry_order() {
        assert_eq!(applicable(ClearMode::All, &[]), Category::ALL.to_vec());
        assert_eq!(
            applicable(ClearMode::Selected, &[Category::History, Category::Cache]),
            vec![Category::Cache, Category::History]
        );
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Storage".parse::<Category>(), Ok(Category::Storage));
        assert!("bogus".parse::<Category>().is_err());
    }

    #[test]
    fn category_serializes_as_lowercase_id() {
        let json = serde_json::to_string(&Category::Cookies).unwrap_or_default();
        assert_eq!(json, "\"cookies\"");
    }
}
