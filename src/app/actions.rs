/// User actions exposed by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Save,
    New,
    Duplicate,
    Raw,
    Share,
}

/// A key-down event as seen by shortcut dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyEvent {
    pub ctrl: bool,
    pub shift: bool,
    /// Lowercase letter of the pressed key.
    pub key: char,
}

impl KeyEvent {
    pub fn ctrl(key: char) -> Self {
        Self { ctrl: true, shift: false, key }
    }

    pub fn ctrl_shift(key: char) -> Self {
        Self { ctrl: true, shift: true, key }
    }
}

/// State the shortcut predicates and enablement derivation read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionContext {
    pub locked: bool,
    pub share_enabled: bool,
}

/// One action binding: the action, its presentation metadata, and the
/// shortcut predicate. Stateless beyond reading the context.
pub struct ActionBinding {
    pub action: Action,
    pub label: &'static str,
    pub shortcut_description: &'static str,
    matches: fn(&KeyEvent, &ActionContext) -> bool,
}

impl ActionBinding {
    pub fn matches_shortcut(&self, event: &KeyEvent, ctx: &ActionContext) -> bool {
        (self.matches)(event, ctx)
    }
}

/// Fixed, ordered action table. Order is significant: dispatch stops at
/// the first binding whose shortcut matches.
pub struct ActionRegistry {
    bindings: Vec<ActionBinding>,
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            bindings: vec![
                ActionBinding {
                    action: Action::Save,
                    label: "Save",
                    shortcut_description: "control + s",
                    matches: |evt, _| evt.ctrl && evt.key == 's',
                },
                ActionBinding {
                    action: Action::New,
                    label: "New",
                    shortcut_description: "control + n",
                    matches: |evt, _| evt.ctrl && evt.key == 'n',
                },
                ActionBinding {
                    action: Action::Duplicate,
                    label: "Duplicate & Edit",
                    shortcut_description: "control + d",
                    matches: |evt, ctx| ctx.locked && evt.ctrl && evt.key == 'd',
                },
                ActionBinding {
                    action: Action::Raw,
                    label: "Just Text",
                    shortcut_description: "control + shift + r",
                    matches: |evt, _| evt.ctrl && evt.shift && evt.key == 'r',
                },
                ActionBinding {
                    action: Action::Share,
                    label: "Share",
                    shortcut_description: "control + shift + t",
                    matches: |evt, ctx| {
                        ctx.share_enabled && ctx.locked && evt.ctrl && evt.shift && evt.key == 't'
                    },
                },
            ],
        }
    }

    pub fn bindings(&self) -> &[ActionBinding] {
        &self.bindings
    }

    /// First matching binding wins; the caller suppresses the event's
    /// default behavior when `Some` is returned.
    pub fn dispatch(&self, event: &KeyEvent, ctx: &ActionContext) -> Option<Action> {
        self.bindings
            .iter()
            .find(|b| b.matches_shortcut(event, ctx))
            .map(|b| b.action)
    }
}

/// Derive the enabled action set from document state. Unlocked gets the
/// light set; a locked document gets the full set, with share gated by
/// the feature flag.
pub fn enabled_actions(ctx: &ActionContext) -> Vec<Action> {
    if ctx.locked {
        let mut actions = vec![Action::New, Action::Duplicate, Action::Raw];
        if ctx.share_enabled {
            actions.push(Action::Share);
        }
        actions
    } else {
        vec![Action::New, Action::Save]
    }
}

pub fn is_enabled(action: Action, ctx: &ActionContext) -> bool {
    enabled_actions(ctx).contains(&action)
}
