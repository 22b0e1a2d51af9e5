/// Hover feedback that applies whether or not the entrance animation runs.
const BASE_RULES: &str = "
.contribution-cell {
  opacity: 1;
  transform-origin: center;
  animation: none;
  transition: filter 180ms ease, opacity 180ms ease;
  cursor: pointer;
}
.contribution-cell:hover {
  transform: none;
  filter: brightness(1.15) drop-shadow(0 2px 8px rgba(0,0,0,0.25));
  opacity: 1 !important;
}
.contribution-cell.high-contribution:hover {
  transform: none;
  filter: brightness(1.2) drop-shadow(0 0 3px currentColor);
}
";

const ENTRANCE_RULES: &str = "
.contribution-cell {
  opacity: 0;
  transform: translateY(6px) scale(0.85);
  animation: popIn 700ms cubic-bezier(0.22, 1, 0.36, 1) forwards;
  transition: transform 180ms ease, filter 180ms ease, opacity 180ms ease;
  will-change: transform, opacity, filter;
}
.contribution-cell.high-contribution {
  animation-name: popInStrong;
}
@keyframes popIn {
  0% { opacity: 0; transform: translateY(8px) scale(0.85); }
  60% { opacity: 1; transform: translateY(-2px) scale(1.06); }
  100% { opacity: 1; transform: translateY(0) scale(1); }
}
@keyframes popInStrong {
  0% { opacity: 0; transform: translateY(10px) scale(0.8); }
  55% { opacity: 1; transform: translateY(-3px) scale(1.1); }
  100% { opacity: 1; transform: translateY(0) scale(1); }
}
";

/// Emitted last so it wins over the entrance rules.
const REDUCED_MOTION_RULES: &str = "
@media (prefers-reduced-motion: reduce) {
  .contribution-cell {
    animation: none !important;
    transform: none !important;
    opacity: 1 !important;
  }
}
";

pub fn render_styles(out: &mut String, enable_animations: bool) {
    out.push_str("<style><![CDATA[");
    out.push_str(BASE_RULES);
    if enable_animations {
        out.push_str(ENTRANCE_RULES);
    }
    out.push_str(REDUCED_MOTION_RULES);
    out.push_str("]]></style>");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styles(enable: bool) -> String {
        let mut out = String::new();
        render_styles(&mut out, enable);
        out
    }

    #[test]
    fn keyframes_only_when_enabled() {
        let on = styles(true);
        assert!(on.contains("@keyframes popIn "));
        assert!(on.contains("@keyframes popInStrong"));
        let off = styles(false);
        assert!(!off.contains("@keyframes"));
        assert!(!off.contains("popIn"));
    }

    #[test]
    fn hover_and_reduced_motion_always_present() {
        for enable in [true, false] {
            let css = styles(enable);
            assert!(css.contains(".contribution-cell:hover"));
            assert!(css.contains("prefers-reduced-motion: reduce"));
            assert!(css.starts_with("<style><![CDATA["));
            assert!(css.ends_with("]]></style>"));
        }
    }
}
