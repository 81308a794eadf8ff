//! Feature flag handling.
//!
//! Features are switched twice: at compile time through cargo features
//! (`stripe`, `vip`, `openapi`) and at runtime through the `use_*` flags of
//! [`AppConfig`]. A runtime feature is on when its flag is set and, where the
//! feature needs one, its configuration section is present.

#[cfg(any(feature = "stripe", feature = "vip"))]
use blakely_config::AppConfig;

/// Check if a feature is enabled at runtime based on configuration.
pub fn is_feature_enabled<T>(use_feature: bool, feature_config: Option<&T>) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if Stripe checkout is enabled at runtime.
#[cfg(feature = "stripe")]
pub fn is_stripe_enabled(config: &AppConfig) -> bool {
    is_feature_enabled(config.use_stripe, config.stripe.as_ref())
}

/// Check if the VIP gallery endpoints are enabled at runtime.
///
/// The VIP stubs have no configuration section, so only the flag counts.
#[cfg(feature = "vip")]
pub fn is_vip_enabled(config: &AppConfig) -> bool {
    config.use_vip
}
