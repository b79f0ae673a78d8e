use std::fmt::{Display, Formatter};

/// Ordered set of CSS class names.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|existing| existing == class)
    }

    /// Returns `true` if the class was not present.
    pub fn add(&mut self, class: &str) -> bool {
        if self.contains(class) {
            false
        } else {
            self.0.push(class.to_string());
            true
        }
    }

    /// Returns `true` if the class was present.
    pub fn remove(&mut self, class: &str) -> bool {
        let len = self.0.len();
        self.0.retain(|existing| existing != class);
        self.0.len() != len
    }

    pub fn toggle(&mut self, class: &str, force: bool) {
        if force {
            self.add(class);
        } else {
            self.remove(class);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ClassList {
    fn from(classes: &str) -> Self {
        let mut list = Self::default();
        for class in classes.split_whitespace() {
            list.add(class);
        }
        list
    }
}

impl Display for ClassList {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0.join(" "))
    }
}
