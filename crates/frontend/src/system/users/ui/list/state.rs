//! Roster rules that do not need a browser: form validation, balance
//! parsing, search and the self-delete restriction.

use contracts::dashboards::d401_admin_overview::dto::AdjustBalanceQuery;
use contracts::system::users::{CreateUserDto, User};

pub const DEFAULT_BALANCE_DESCRIPTION: &str = "Корректировка баланса администратором";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewUserForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub is_admin: bool,
}

impl NewUserForm {
    pub fn validate(&self) -> Result<CreateUserDto, String> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err("Введите имя пользователя".to_string());
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err("Введите корректный email".to_string());
        }
        if self.password.is_empty() {
            return Err("Введите пароль".to_string());
        }
        Ok(CreateUserDto {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
            is_admin: self.is_admin,
        })
    }
}

/// Parse the balance form. Accepts `10.5` and `10,5`; zero is refused.
pub fn parse_balance_delta(amount: &str, description: &str) -> Result<AdjustBalanceQuery, String> {
    let normalized = amount.trim().replace(',', ".");
    let value: f64 = normalized
        .parse()
        .map_err(|_| "Введите сумму числом".to_string())?;
    if !value.is_finite() || value == 0.0 {
        return Err("Сумма должна быть ненулевой".to_string());
    }
    let description = description.trim();
    Ok(AdjustBalanceQuery {
        amount: value,
        description: Some(if description.is_empty() {
            DEFAULT_BALANCE_DESCRIPTION.to_string()
        } else {
            description.to_string()
        }),
    })
}

/// Admins cannot delete their own account.
pub fn can_delete(user: &User, current_user_id: Option<i64>) -> bool {
    current_user_id != Some(user.id)
}

/// Case-insensitive match on username or email.
pub fn filter_users(users: &[User], query: &str) -> Vec<User> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return users.to_vec();
    }
    users
        .iter()
        .filter(|u| {
            u.username.to_lowercase().contains(&query)
                || u.email
                    .as_deref()
                    .unwrap_or("")
                    .to_lowercase()
                    .contains(&query)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, username: &str, email: Option<&str>) -> User {
        User {
            id,
            username: username.into(),
            email: email.map(str::to_string),
            is_admin: false,
            is_active: true,
            balance: 0.0,
            created_at: None,
        }
    }

    #[test]
    fn new_user_requires_all_fields() {
        let mut form = NewUserForm {
            username: " bob ".into(),
            email: "bob@example.com".into(),
            password: "secret".into(),
            is_admin: true,
        };
        let dto = form.validate().unwrap();
        assert_eq!(dto.username, "bob");
        assert!(dto.is_admin);

        form.email = "nope".into();
        assert!(form.validate().is_err());
        form.email = "bob@example.com".into();
        form.password.clear();
        assert_eq!(form.validate(), Err("Введите пароль".to_string()));
    }

    #[test]
    fn balance_accepts_comma_and_defaults_description() {
        let q = parse_balance_delta("10,5", "  ").unwrap();
        assert_eq!(q.amount, 10.5);
        assert_eq!(q.description.as_deref(), Some(DEFAULT_BALANCE_DESCRIPTION));

        let q = parse_balance_delta("-2", "штраф").unwrap();
        assert_eq!(q.amount, -2.0);
        assert_eq!(q.description.as_deref(), Some("штраф"));
    }

    #[test]
    fn balance_rejects_zero_and_garbage() {
        assert!(parse_balance_delta("0", "").is_err());
        assert!(parse_balance_delta("abc", "").is_err());
        assert!(parse_balance_delta("", "").is_err());
    }

    #[test]
    fn self_delete_is_disabled() {
        let me = user(1, "admin", None);
        let other = user(2, "bob", None);
        assert!(!can_delete(&me, Some(1)));
        assert!(can_delete(&other, Some(1)));
    }

    #[test]
    fn search_matches_username_or_email() {
        let users = vec![
            user(1, "Alice", Some("alice@corp.io")),
            user(2, "bob", Some("robert@mail.ru")),
            user(3, "carol", None),
        ];
        let ids = |q: &str| filter_users(&users, q).iter().map(|u| u.id).collect::<Vec<_>>();
        assert_eq!(ids("ali"), vec![1]);
        assert_eq!(ids("MAIL.RU"), vec![2]);
        assert_eq!(ids(""), vec![1, 2, 3]);
    }
}
