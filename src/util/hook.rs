use crate::ui::tui;

/// Leaves the alternate screen before the panic report is printed.
pub fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        tracing::error!(panic = %panic_info, "panic");
        let _ = tui::Tui::restore();
        hook(panic_info);
    }));
}
