//! Reduced-motion override rule.

use crate::schema::BackgroundConfig;

/// Snapshot consumers see for `user` under the reduced-motion signal.
///
/// While the signal is set an active effect is forced static. The user's
/// own `is_animated` is never touched, so clearing the signal restores it.
pub(super) fn effective(user: &BackgroundConfig, reduced: bool) -> BackgroundConfig {
    let mut config = user.clone();
    if reduced && config.is_active() {
        config.is_animated = false;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::EffectType;

    #[test]
    fn reduced_forces_active_effect_static() {
        let user = BackgroundConfig::default_config();
        assert!(!effective(&user, true).is_animated);
        assert!(effective(&user, false).is_animated);
    }

    #[test]
    fn inactive_effect_is_left_alone() {
        let user = BackgroundConfig {
            effect: EffectType::None,
            ..BackgroundConfig::default_config()
        };
        assert_eq!(effective(&user, true), user);
    }
}
