//! Who is invoking a command and what they may do.

use serenity::all::{Context, GuildId, Member, Permissions, RoleId};

use crate::{config::Config, error::AppError};

/// Member behind a command or interaction.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user_id: u64,
    /// Display name, used in footers such as *Closed by*.
    pub display: String,
    pub permissions: Permissions,
    pub roles: Vec<u64>,
}

impl Caller {
    /// Builds a caller from a member whose guild permissions are known.
    pub fn from_member(member: &Member, permissions: Permissions) -> Self {
        Self {
            user_id: member.user.id.get(),
            display: member.display_name().to_string(),
            permissions,
            roles: member.roles.iter().map(|role| role.get()).collect(),
        }
    }

    /// Resolves the caller's guild permissions.
    ///
    /// Interaction payloads already carry them; for messages they come from
    /// the cached guild, or from the guild's roles when the guild is not cached.
    pub async fn resolve(
        ctx: &Context,
        guild_id: GuildId,
        member: &Member,
    ) -> Result<Self, AppError> {
        if let Some(permissions) = member.permissions {
            return Ok(Self::from_member(member, permissions));
        }

        let cached = ctx
            .cache
            .guild(guild_id)
            .map(|guild| guild.member_permissions(member));

        let permissions = match cached {
            Some(permissions) => permissions,
            None => {
                let roles = guild_id.roles(&ctx.http).await?;
                let everyone = roles
                    .get(&RoleId::new(guild_id.get()))
                    .map(|role| role.permissions)
                    .unwrap_or_else(Permissions::empty);
                let granted = member
                    .roles
                    .iter()
                    .filter_map(|id| roles.get(id))
                    .map(|role| role.permissions);

                permissions_from_roles(everyone, granted)
            }
        };

        Ok(Self::from_member(member, permissions))
    }

    pub fn is_admin(&self) -> bool {
        self.permissions.administrator()
    }

    pub fn is_owner(&self, config: &Config) -> bool {
        self.user_id == config.owner_id
    }

    pub fn has_role(&self, role_id: u64) -> bool {
        self.roles.contains(&role_id)
    }

    /// Administrators and holders of the staff or middleman role.
    pub fn is_staff(&self, config: &Config) -> bool {
        self.is_admin()
            || self.has_role(config.staff_role_id)
            || self.has_role(config.middleman_role_id)
    }

    pub fn require_staff(&self, config: &Config) -> Result<(), AppError> {
        if self.is_staff(config) {
            Ok(())
        } else {
            Err(AppError::PermissionDenied(
                "You need the staff role to use this command.".to_string(),
            ))
        }
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::PermissionDenied(
                "You need administrator permissions to use this command.".to_string(),
            ))
        }
    }

    /// Requires a Discord permission; administrators always pass.
    pub fn require(&self, permission: Permissions, name: &str) -> Result<(), AppError> {
        if self.is_admin() || self.permissions.contains(permission) {
            Ok(())
        } else {
            Err(AppError::PermissionDenied(format!(
                "You need the `{}` permission to use this command.",
                name
            )))
        }
    }
}

/// Guild-level permissions granted by `@everyone` plus the member's roles.
///
/// Administrator grants everything.
pub fn permissions_from_roles(
    everyone: Permissions,
    roles: impl IntoIterator<Item = Permissions>,
) -> Permissions {
    let combined = roles
        .into_iter()
        .fold(everyone, |acc, permissions| acc | permissions);

    if combined.administrator() {
        Permissions::all()
    } else {
        combined
    }
}
