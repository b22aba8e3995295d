use serde::{Deserialize, Serialize};

/// 可清理的数据类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// 浏览器缓存
    Cache,
    Cookies,
    /// 本地存储
    Storage,
    /// 浏览历史
    History,
}

impl Category {
    /// 声明顺序，也是展示顺序
    pub const ALL: [Category; 4] = [
        Category::Cache,
        Category::Cookies,
        Category::Storage,
        Category::History,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Category::Cache => "cache",
            Category::Cookies => "cookies",
            Category::Storage => "storage",
            Category::History => "history",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Cache => "浏览器缓存",
            Category::Cookies => "Cookies",
            Category::Storage => "本地存储",
            Category::History => "浏览历史",
        }
    }

    pub fn from_id(id: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.id() == id)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_id(&s.trim().to_lowercase()).ok_or_else(|| format!("未知的类别: {}", s))
    }
}

/// 清理模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearMode {
    All,
    Selected,
}

impl std::fmt::Display for ClearMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClearMode::All => write!(f, "all"),
            ClearMode::Selected => write!(f, "selected"),
        }
    }
}
