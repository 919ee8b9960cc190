use console::style;

use jenkins_state::StateIcon;

/// Styling helpers for terminal output
pub fn dim(text: impl std::fmt::Display) -> console::StyledObject<String> {
    style(text.to_string()).dim()
}

pub fn magenta_bold(text: impl std::fmt::Display) -> console::StyledObject<String> {
    style(text.to_string()).magenta().bold()
}

/// Colors an icon id the way the icon itself is drawn.
pub fn icon(icon: StateIcon) -> console::StyledObject<String> {
    let styled = style(icon.id().to_string());
    match icon {
        StateIcon::Blue => styled.bright().blue(),
        StateIcon::Red => styled.bright().red(),
        StateIcon::Yellow => styled.bright().yellow(),
        StateIcon::Grey => styled.dim(),
        StateIcon::Folder => styled.cyan(),
    }
}
