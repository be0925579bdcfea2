use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Колонка, по которой сортируется загруженная страница.
pub enum SortKey {
    /// Числовое сравнение идентификаторов.
    Id,
    /// Имя без учёта регистра.
    Name,
    /// Email без учёта регистра.
    Email,
    /// Дата регистрации.
    CreatedAt,
}

impl SortKey {
    /// Все колонки в порядке отображения.
    pub const ALL: [SortKey; 4] = [SortKey::Id, SortKey::Name, SortKey::Email, SortKey::CreatedAt];

    /// Имя поля в API.
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Name => "name",
            SortKey::Email => "email",
            SortKey::CreatedAt => "created_at",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(SortKey::Id),
            "name" => Ok(SortKey::Name),
            "email" => Ok(SortKey::Email),
            "created_at" | "created-at" | "date" => Ok(SortKey::CreatedAt),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Направление сортировки.
pub enum SortOrder {
    /// По возрастанию.
    #[default]
    Asc,
    /// По убыванию.
    Desc,
}

impl SortOrder {
    /// Противоположное направление.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Активная колонка и направление.
pub struct SortState {
    /// Активная колонка.
    pub key: SortKey,
    /// Направление.
    pub order: SortOrder,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::Id,
            order: SortOrder::Asc,
        }
    }
}

impl SortState {
    /// Клик по заголовку колонки: та же колонка меняет направление,
    /// другая становится активной по возрастанию.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.order = self.order.toggled();
        } else {
            self.key = key;
            self.order = SortOrder::Asc;
        }
    }
}

/// Возвращает копию `users`, отсортированную по `sort`.
///
/// Сортировка стабильная; для убывания разворачивается компаратор,
/// поэтому равные элементы сохраняют исходный порядок в обоих направлениях.
pub fn sort_users(users: &[User], sort: SortState) -> Vec<User> {
    let mut sorted = users.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare_by_key(a, b, sort.key);
        match sort.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    sorted
}

fn compare_by_key(a: &User, b: &User, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        // отсутствующая дата сортируется как пустое значение, то есть первой
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Email => a.email.to_lowercase().cmp(&b.email.to_lowercase()),
    }
}
