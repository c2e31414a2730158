pub struct FileSizeUtils;

impl FileSizeUtils {
    /// Human-readable size with one decimal, e.g. `1.5 KB`. Whole values
    /// drop the decimal, so 1024 bytes is `1 KB`.
    pub fn format_size(size: u64) -> String {
        const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
        if size == 0 {
            return "0 B".to_string();
        }

        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        let rounded = (size * 10.0).round() / 10.0;
        if rounded.fract() == 0.0 {
            format!("{:.0} {}", rounded, UNITS[unit_index])
        } else {
            format!("{:.1} {}", rounded, UNITS[unit_index])
        }
    }
}
