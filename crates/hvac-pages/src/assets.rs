/// Stylesheet and tab script embedded in every page.

pub const PAGE_CSS: &str = r#"
* { box-sizing: border-box; margin: 0; padding: 0; }
#product-container {
    font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
    max-width: 1200px;
    margin: 0 auto;
    padding: 20px;
    color: #000;
    background: #fff;
}
#product-container h1 {
    font-size: 2.5em;
    color: #D53938;
    margin-bottom: 10px;
    padding-bottom: 15px;
    border-bottom: 3px solid #D53938;
    font-weight: 700;
}
#product-container h2 { font-size: 1.8em; color: #D53938; margin: 30px 0 15px 0; font-weight: 600; }
#product-container h3 { font-size: 1.4em; color: #57A9F9; margin: 25px 0 12px 0; font-weight: 600; }
#product-container p { line-height: 1.8; margin-bottom: 15px; font-size: 1.05em; color: #333; }
.intro-section {
    background: linear-gradient(135deg, #f8f9fa 0%, #e9ecef 100%);
    padding: 25px;
    border-radius: 8px;
    margin: 25px 0;
    border-left: 5px solid #D53938;
}
.specs-table {
    width: 100%;
    border-collapse: collapse;
    margin: 20px 0;
    box-shadow: 0 2px 8px rgba(0,0,0,0.1);
    border-radius: 8px;
    overflow: hidden;
}
.specs-table thead { background: linear-gradient(135deg, #D53938 0%, #b32d2c 100%); color: white; }
.specs-table th { padding: 15px; text-align: left; font-weight: 600; font-size: 1.1em; }
.specs-table td { padding: 12px 15px; border-bottom: 1px solid #e0e0e0; }
.specs-table tbody tr { background: #fff; transition: all 0.3s ease; }
.specs-table tbody tr:nth-child(even) { background: #f8f9fa; }
.specs-table tbody tr:hover { background: linear-gradient(90deg, #D53938 0%, #b32d2c 100%) !important; color: white; }
.specs-table tbody tr:hover td { color: white; }
.warranty-section {
    background: linear-gradient(135deg, #F8F9FA 0%, #e9ecef 100%);
    padding: 50px 30px;
    border-radius: 15px;
    margin: 50px 0;
}
.warranty-section h2 { color: #D53938; text-align: center; margin-bottom: 40px; font-size: 28px; }
.warranty-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
    gap: 30px;
    max-width: 800px;
    margin: 0 auto;
}
.warranty-card {
    background: white;
    padding: 30px;
    border-radius: 12px;
    text-align: center;
    border: 2px solid rgba(213,57,56,0.3);
    transition: all 0.3s ease;
}
.warranty-card:hover { background: rgba(213,57,56,0.05); border-color: #D53938; transform: translateY(-5px); }
.warranty-years { font-size: 48px; font-weight: 700; color: #D53938; }
.warranty-label { color: #333; font-size: 14px; font-weight: 600; }
.warranty-note { margin-top: 30px; text-align: center; color: #666; font-size: 0.95em; }
.cta-section {
    background: linear-gradient(135deg, #F8F9FA 0%, #e9ecef 100%);
    padding: 60px 30px;
    border-radius: 15px;
    margin-top: 50px;
    box-shadow: 0 10px 40px rgba(0,0,0,0.2);
}
.cta-content { text-align: center; margin-bottom: 40px; }
.cta-section h2 { color: #D53938; margin: 0 0 15px 0; font-size: 28px; font-weight: 700; }
.cta-section p { color: #333; margin: 0 auto; font-size: 16px; max-width: 700px; line-height: 1.6; }
.compliance-badge {
    background: rgba(213,57,56,0.05);
    border: 2px solid #D53938;
    border-radius: 12px;
    padding: 25px 30px;
    display: flex;
    align-items: center;
    gap: 20px;
    max-width: 700px;
    margin: 0 auto;
}
.badge-icon {
    font-size: 32px;
    color: #D53938;
    font-weight: 700;
    background: rgba(213,57,56,0.2);
    width: 50px;
    height: 50px;
    border-radius: 50%;
    display: flex;
    align-items: center;
    justify-content: center;
    flex-shrink: 0;
}
.badge-content { text-align: left; }
.badge-content h3 { color: #D53938; margin: 0 0 8px 0; font-size: 18px; font-weight: 700; }
.badge-content p { color: #555; margin: 0; font-size: 14px; line-height: 1.5; }
.disclaimer { margin-top: 20px; text-align: center; color: #666; font-size: 0.9em; }
.tab-container { margin: 30px 0; }
.tab-buttons { display: flex; gap: 10px; margin-bottom: 20px; flex-wrap: wrap; }
.tab-button {
    padding: 12px 24px;
    background: #f8f9fa;
    border: 2px solid #ddd;
    border-radius: 8px;
    cursor: pointer;
    font-size: 1em;
    font-weight: 600;
    color: #333;
    transition: all 0.3s ease;
}
.tab-button:hover { background: #e9ecef; border-color: #57A9F9; }
.tab-button.active { background: linear-gradient(135deg, #D53938 0%, #b32d2c 100%); color: white; border-color: #D53938; }
.tab-content { display: none; }
.tab-content.active { display: block; }
@media (max-width: 768px) {
    #product-container { padding: 15px; }
    #product-container h1 { font-size: 1.8em; }
    #product-container h2 { font-size: 1.4em; }
    .specs-table { font-size: 0.9em; }
    .specs-table th, .specs-table td { padding: 10px; }
    .compliance-badge { flex-direction: column; text-align: center; padding: 20px; }
    .badge-content { text-align: center; }
    .cta-section { padding: 40px 20px; }
    .tab-buttons { flex-direction: column; }
    .tab-button { width: 100%; }
}
"#;

pub const TAB_SCRIPT: &str = r#"
function showTab(event, tabId) {
    const tabContents = document.getElementsByClassName('tab-content');
    for (let i = 0; i < tabContents.length; i++) {
        tabContents[i].classList.remove('active');
    }
    const tabButtons = document.getElementsByClassName('tab-button');
    for (let i = 0; i < tabButtons.length; i++) {
        tabButtons[i].classList.remove('active');
    }
    document.getElementById(tabId).classList.add('active');
    event.currentTarget.classList.add('active');
}
"#;
