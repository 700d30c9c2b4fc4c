//! Default `settings.toml` with inline documentation.

pub(crate) fn default_settings_toml() -> String {
    r##"# Backdrop engine settings
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[capability]
# capable_score = 8          # minimum score for continuous animation
# gpu_override_fps = 36.0    # warm-up fps that makes a GPU device capable
# floor_fps = 18.0           # below this warm-up fps, always static
# warmup_ms = 1000.0         # warm-up duration, 100-10000
# bonus_high_fps = 60.0      # +2 at or above
# bonus_mid_fps = 45.0       # +1 at or above
# low_core_cap = 4           # score ceiling for this many cores or fewer
# default_memory_gb = 4.0    # assumed when memory is unknown

[driver]
# frame_budget_ms = 33.0     # minimum gap between drawn frames
# fps_window_ms = 1000.0     # fps broadcast window
# fps_source = "draw"        # "draw" or "schedule"

[storage]
# dir = "/path/to/state"     # default: platform data dir

[display]
# dark_mode = true
# width = 1280
# height = 720
"##
    .to_string()
}
