pub const DESIGNER_STYLES: &str = r#"
:root {
    --bg: #f8fafc;
    --card-bg: #ffffff;
    --border-color: #e2e8f0;
    --text-primary: #0f172a;
    --text-muted: #64748b;
    --accent: #0f172a;
    --danger: #dc2626;
    --banner-bg: #fef9c3;
    --banner-border: #facc15;
}

body {
    margin: 0;
    background: var(--bg);
    color: var(--text-primary);
    font-family: system-ui, -apple-system, sans-serif;
}

/* Shell */
.designer-shell {
    display: flex;
    flex-direction: column;
    min-height: 100vh;
}

.designer-header {
    position: sticky;
    top: 0;
    display: flex;
    align-items: center;
    gap: 1rem;
    height: 4rem;
    padding: 0 1.5rem;
    border-bottom: 1px solid var(--border-color);
    background: var(--card-bg);
    font-weight: 600;
}

.designer-main {
    display: flex;
    flex-direction: column;
    gap: 1.5rem;
    padding: 2rem;
}

.designer-intro {
    margin: 0;
    font-size: 0.875rem;
}

.designer-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(28rem, 1fr));
    gap: 1rem;
}

/* Cards */
.card {
    display: flex;
    flex-direction: column;
    border: 1px solid var(--border-color);
    border-radius: 0.5rem;
    background: var(--card-bg);
}

.card-header {
    display: flex;
    align-items: center;
    justify-content: space-between;
    padding: 1.5rem;
}

.card-title {
    margin: 0;
    font-weight: 600;
}

.card-body {
    flex: 1;
    display: flex;
    flex-direction: column;
    gap: 1rem;
    padding: 0 1.5rem 1.5rem;
    overflow-y: auto;
    max-height: 70vh;
}

.card-footer {
    display: flex;
    justify-content: center;
    padding: 1rem;
    border-top: 1px solid var(--border-color);
}

/* Badge */
.field-count {
    margin: 0 0.5rem;
    padding: 0.125rem 0.625rem;
    border: none;
    border-radius: 9999px;
    background: var(--accent);
    color: white;
    font-size: 0.75rem;
    font-weight: 600;
    cursor: pointer;
}

.field-count:hover {
    background: var(--danger);
}

/* Record cards */
.record-card {
    display: flex;
    gap: 0.5rem;
    padding: 1rem;
    border: 1px solid var(--border-color);
    border-radius: 0.5rem;
}

.record-gutter {
    display: flex;
    flex-direction: column;
    align-items: center;
    gap: 0.5rem;
}

.record-number {
    display: flex;
    align-items: center;
    justify-content: center;
    width: 2rem;
    height: 2rem;
    border-radius: 9999px;
    background: var(--accent);
    color: white;
    font-size: 0.875rem;
    font-weight: 700;
}

.record-remove {
    border: none;
    background: none;
    cursor: pointer;
    color: var(--text-muted);
}

.record-remove:hover {
    color: var(--danger);
}

.record-fields {
    flex: 1;
    display: flex;
    flex-direction: column;
    gap: 0.5rem;
}

.record-fields input,
.record-fields textarea {
    padding: 0.5rem 0.75rem;
    border: 1px solid var(--border-color);
    border-radius: 0.375rem;
    font: inherit;
}

/* Preview */
.tab-list {
    display: grid;
    grid-template-columns: 1fr 1fr;
    gap: 0.25rem;
    padding: 0.25rem;
    border-radius: 0.375rem;
    background: var(--bg);
}

.tab {
    padding: 0.375rem;
    border: none;
    border-radius: 0.25rem;
    background: none;
    cursor: pointer;
}

.tab.active {
    background: var(--card-bg);
    box-shadow: 0 1px 2px rgba(0, 0, 0, 0.08);
}

.preview-text {
    width: 100%;
    height: 15rem;
    box-sizing: border-box;
    padding: 0.75rem;
    border: 1px solid var(--border-color);
    border-radius: 0.375rem;
    font-family: ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, monospace;
    font-size: 0.8125rem;
}

.preview-error {
    margin: 0;
    color: var(--danger);
    font-size: 0.8125rem;
}

.actions {
    display: flex;
    gap: 0.5rem;
}

.button {
    flex: 1;
    padding: 0.5rem 1rem;
    border: 1px solid var(--accent);
    border-radius: 0.375rem;
    background: var(--accent);
    color: white;
    cursor: pointer;
}

.button.outline,
.button.ghost {
    background: none;
    color: var(--text-primary);
}

.button.ghost {
    flex: 0;
    border-color: transparent;
}

.button:disabled {
    opacity: 0.6;
    cursor: progress;
}

/* Published banner */
.published-banner {
    padding: 1rem;
    border: 2px solid var(--banner-border);
    border-radius: 0.5rem;
    background: var(--banner-bg);
}

.published-banner a {
    word-break: break-all;
}

/* Reset dialog */
.dialog-backdrop {
    position: fixed;
    inset: 0;
    display: flex;
    align-items: center;
    justify-content: center;
    background: rgba(15, 23, 42, 0.5);
}

.dialog {
    max-width: 28rem;
    padding: 1.5rem;
    border-radius: 0.5rem;
    background: var(--card-bg);
}

.dialog-footer {
    display: flex;
    justify-content: flex-end;
    gap: 0.5rem;
}
"#;
