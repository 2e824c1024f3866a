pub fn render_index() -> &'static str {
    INDEX_HTML
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Grid</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --cell: #e8e2d4;
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      justify-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(980px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
      font-size: 1rem;
    }

    form.create {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      align-items: center;
    }

    input, select {
      font: inherit;
      padding: 10px 14px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      background: white;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    button.ghost {
      background: transparent;
      color: var(--accent-2);
      border: 1px solid rgba(47, 72, 88, 0.25);
    }

    .habit {
      background: white;
      border-radius: 20px;
      padding: 20px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 14px;
    }

    .habit-header {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: center;
      justify-content: space-between;
    }

    .habit-title {
      display: flex;
      align-items: center;
      gap: 10px;
      font-size: 1.2rem;
      font-weight: 600;
    }

    .dot {
      width: 14px;
      height: 14px;
      border-radius: 50%;
    }

    .meta {
      color: #6b645d;
      font-size: 0.9rem;
    }

    .grid {
      display: grid;
      grid-auto-flow: column;
      grid-template-rows: repeat(7, 13px);
      gap: 3px;
      overflow-x: auto;
      padding-bottom: 6px;
    }

    .cell {
      width: 13px;
      height: 13px;
      border-radius: 3px;
      background: var(--cell);
      cursor: pointer;
    }

    .cell.blank {
      background: transparent;
      cursor: default;
    }

    .cell.future {
      background: transparent;
      border: 1px solid var(--cell);
      cursor: default;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Habit Grid</h1>
      <p class="subtitle">One square per day. Click a square to mark or unmark it.</p>
    </header>

    <form class="create" id="create-form">
      <input id="habit-name" type="text" placeholder="New habit name" required />
      <select id="habit-color"></select>
      <button type="submit">Create habit</button>
    </form>

    <div id="habits"></div>
    <div class="status" id="status"></div>
  </main>

  <script>
    const COLORS = {
      rose: '#f43f5e', pink: '#ec4899', fuchsia: '#d946ef', purple: '#a855f7',
      violet: '#8b5cf6', indigo: '#6366f1', blue: '#3b82f6', sky: '#0ea5e9',
      cyan: '#06b6d4', teal: '#14b8a6', emerald: '#10b981', green: '#22c55e',
      lime: '#84cc16', yellow: '#eab308', amber: '#f59e0b', orange: '#f97316',
      red: '#ef4444', stone: '#78716c', neutral: '#737373', zinc: '#71717a',
      gray: '#6b7280', slate: '#64748b'
    };
    const MONTH_LENGTHS = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

    const habitsEl = document.getElementById('habits');
    const statusEl = document.getElementById('status');
    const colorSelect = document.getElementById('habit-color');
    const selectedYears = {};

    for (const name of Object.keys(COLORS)) {
      const option = document.createElement('option');
      option.value = name;
      option.textContent = name;
      colorSelect.appendChild(option);
    }

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const isLeapYear = (year) => year % 4 === 0 && (year % 100 !== 0 || year % 400 === 0);

    const monthDay = (dayOfYear, year) => {
      let remaining = dayOfYear;
      for (let month = 1; month <= 12; month += 1) {
        let length = MONTH_LENGTHS[month - 1];
        if (month === 2 && isLeapYear(year)) length += 1;
        if (remaining <= length) return [month, remaining];
        remaining -= length;
      }
      return [12, 31];
    };

    const api = async (path, options) => {
      const res = await fetch(path, options);
      if (!res.ok) {
        throw new Error(await res.text() || ('request failed: ' + res.status));
      }
      return res.status === 204 ? null : res.json();
    };

    const toggleDay = async (grid, dayOfYear, cell) => {
      const [month, day] = monthDay(dayOfYear, grid.year);
      const wasMarked = cell.dataset.marked === '1';
      paintCell(cell, !wasMarked, grid.color);
      try {
        await api('/api/habits/' + grid.habit_id + '/toggle', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ year: grid.year, month, day })
        });
        renderGrid(grid.habit_id, grid.year);
      } catch (err) {
        paintCell(cell, wasMarked, grid.color);
        setStatus(err.message, 'error');
      }
    };

    const paintCell = (cell, marked, color) => {
      cell.dataset.marked = marked ? '1' : '0';
      cell.style.background = marked ? COLORS[color] : '';
    };

    const renderGrid = async (habitId, year) => {
      const grid = await api('/api/habits/' + habitId + '/grid/' + year);
      const card = document.getElementById('habit-' + habitId);
      if (!card) return;

      card.querySelector('.meta').textContent =
        grid.total + ' days in ' + grid.year + ' | streak ' + grid.streak;

      const yearSelect = card.querySelector('select');
      yearSelect.innerHTML = '';
      for (const y of grid.years) {
        const option = document.createElement('option');
        option.value = y;
        option.textContent = y;
        option.selected = y === grid.year;
        yearSelect.appendChild(option);
      }

      const marked = new Set(grid.marked_days);
      const gridEl = card.querySelector('.grid');
      gridEl.innerHTML = '';
      for (let i = 0; i < grid.leading_blanks; i += 1) {
        const blank = document.createElement('div');
        blank.className = 'cell blank';
        gridEl.appendChild(blank);
      }
      for (let day = 1; day <= grid.days_in_year; day += 1) {
        const cell = document.createElement('div');
        cell.className = 'cell';
        if (grid.today_day_of_year !== null && day > grid.today_day_of_year) {
          cell.classList.add('future');
        } else {
          paintCell(cell, marked.has(day), grid.color);
          cell.addEventListener('click', () => toggleDay(grid, day, cell));
        }
        const [month, dayOfMonth] = monthDay(day, grid.year);
        cell.title = grid.year + '-' + month + '-' + dayOfMonth;
        gridEl.appendChild(cell);
      }
    };

    const renderHabit = (habit) => {
      const year = selectedYears[habit.id] || new Date().getFullYear();
      const card = document.createElement('section');
      card.className = 'habit';
      card.id = 'habit-' + habit.id;
      card.innerHTML = `
        <div class="habit-header">
          <div class="habit-title">
            <span class="dot" style="background: ${COLORS[habit.color]}"></span>
            <span></span>
          </div>
          <div class="meta"></div>
          <div>
            <select></select>
            <button class="ghost" type="button">Delete</button>
          </div>
        </div>
        <div class="grid"></div>
      `;
      card.querySelector('.habit-title span:last-child').textContent = habit.name;
      card.querySelector('select').addEventListener('change', (event) => {
        selectedYears[habit.id] = Number(event.target.value);
        renderGrid(habit.id, selectedYears[habit.id]).catch((err) => setStatus(err.message, 'error'));
      });
      card.querySelector('button').addEventListener('click', async () => {
        try {
          await api('/api/habits/' + habit.id, { method: 'DELETE' });
          loadHabits();
        } catch (err) {
          setStatus(err.message, 'error');
        }
      });
      habitsEl.appendChild(card);
      renderGrid(habit.id, year).catch((err) => setStatus(err.message, 'error'));
    };

    const loadHabits = async () => {
      const habits = await api('/api/habits');
      habitsEl.innerHTML = '';
      habits.forEach(renderHabit);
    };

    document.getElementById('create-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      const name = document.getElementById('habit-name').value;
      try {
        await api('/api/habits', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ name, color: colorSelect.value })
        });
        document.getElementById('habit-name').value = '';
        loadHabits();
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    loadHabits().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
