use super::models::Category;
use crate::modules::common::error::SweepError;

/// 四个复选框的当前状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub cache: bool,
    pub cookies: bool,
    pub storage: bool,
    pub history: bool,
}

impl SelectionState {
    pub fn from_categories(categories: &[Category]) -> Self {
        let mut state = Self::default();
        for category in categories {
            state.set(*category, true);
        }
        state
    }

    pub fn set(&mut self, category: Category, checked: bool) {
        match category {
            Category::Cache => self.cache = checked,
            Category::Cookies => self.cookies = checked,
            Category::Storage => self.storage = checked,
            Category::History => self.history = checked,
        }
    }

    pub fn is_checked(&self, category: Category) -> bool {
        match category {
            Category::Cache => self.cache,
            Category::Cookies => self.cookies,
            Category::Storage => self.storage,
            Category::History => self.history,
        }
    }

    /// 选中的类别，按声明顺序
    pub fn selected(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.is_checked(*c))
            .collect()
    }

    /// 校验选择，为空时拒绝
    pub fn validate(&self) -> Result<Vec<Category>, SweepError> {
        let selected = self.selected();
        if selected.is_empty() {
            return Err(SweepError::NoSelection);
        }
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_is_rejected() {
        let state = SelectionState::default();
        assert!(matches!(state.validate(), Err(SweepError::NoSelection)));
    }

    #[test]
    fn selection_is_ordered_by_declaration() {
        let mut state = SelectionState::default();
        state.set(Category::History, true);
        state.set(Category::Cookies, true);
        state.set(Category::Cache, true);
        state.set(Category::Cache, false);

        assert_eq!(
            state.validate().unwrap_or_default(),
            vec![Category::Cookies, Category::History]
        );
    }

    #[test]
    fn from_categories_round_trips_through_checkbox_state() {
        let state = SelectionState::from_categories(&[Category::Storage, Category::Cookies]);
        assert!(state.cookies && state.storage);
        assert!(!state.cache && !state.history);
    }
}
