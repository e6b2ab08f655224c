//! Class attribute editing for HUD elements

/// Return `classes` with `class` added (`on`) or removed, keeping every
/// other class in its original order.
pub fn with_class(classes: &str, class: &str, on: bool) -> String {
    let mut kept: Vec<&str> = classes
        .split_whitespace()
        .filter(|c| *c != class)
        .collect();
    if on {
        kept.push(class);
    }
    kept.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_other_classes() {
        assert_eq!(with_class("hud-item pop", "hidden", true), "hud-item pop hidden");
    }

    #[test]
    fn test_remove_keeps_other_classes() {
        assert_eq!(with_class("hidden hud-item  pop", "hidden", false), "hud-item pop");
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(with_class("a hidden", "hidden", true), "a hidden");
        assert_eq!(with_class("", "hidden", false), "");
        assert_eq!(with_class("", "hidden", true), "hidden");
    }
}
