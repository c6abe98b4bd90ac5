//! Dashboard stylesheet

pub const STYLES: &str = r#"
        :root {
            --border: #d1d5db;
            --muted: #f3f4f6;
            --blue: #3b82f6;
            --blue-dark: #1d4ed8;
            --red: #ef4444;
            --red-dark: #b91c1c;
            --yellow: #eab308;
            --yellow-dark: #a16207;
        }
        * { box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0;
            color: #111827;
        }
        .container { max-width: 1200px; margin: 0 auto; padding: 1rem; }
        .toolbar { display: flex; justify-content: space-between; align-items: center; margin-bottom: 1rem; }
        .toolbar form { display: inline; }
        .refresh-time { color: #6b7280; font-size: 0.85rem; }
        table { width: 100%; border-collapse: collapse; }
        th { background: var(--muted); padding: 0.5rem 1rem; text-align: left; }
        td { border: 1px solid var(--border); padding: 0.5rem 1rem; }
        td.actions { display: flex; gap: 0.5rem; }
        input[type=text], input[type=password], input[type=number] {
            border: 1px solid var(--border);
            border-radius: 0.25rem;
            padding: 0.5rem 0.75rem;
        }
        .btn {
            border: none;
            border-radius: 0.25rem;
            color: #fff;
            cursor: pointer;
            font-weight: 700;
            padding: 0.5rem 1rem;
        }
        .btn:disabled { opacity: 0.5; cursor: not-allowed; }
        .btn-primary { background: var(--blue); }
        .btn-primary:hover { background: var(--blue-dark); }
        .btn-danger { background: var(--red); }
        .btn-danger:hover { background: var(--red-dark); }
        .btn-warn { background: var(--yellow); }
        .btn-warn:hover { background: var(--yellow-dark); }
        .panel { margin-top: 1rem; border: 1px solid var(--border); border-radius: 0.5rem; padding: 1.5rem; }
        .notice { color: #b91c1c; padding-bottom: 1rem; }
        .login { max-width: 28rem; margin: 5rem auto; display: flex; flex-direction: column; gap: 1rem; }
"#;
