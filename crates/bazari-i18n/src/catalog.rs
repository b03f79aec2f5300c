// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The translation catalog: every user-visible string in all three locales.
//!
//! Entries are `(fa, ru, en)` tuples. Strings with a `{}` placeholder are
//! formatted by the caller. Keys identify meaning, never wording; the engine
//! and adapters must not hard-code display text.

use strum::EnumIter;

/// Translation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Key {
    // Language selection
    SelectLanguage,
    LanguagePersian,
    LanguageRussian,
    LanguageEnglish,
    LanguageSelected,

    // Main menu
    WelcomeMessage,
    NewAdButton,
    MyAdsButton,
    SupportButton,
    BackToMenuButton,
    ChangeLanguageButton,

    // Ad creation flow
    AdPostingGuide,
    GiftLinkRequest,
    DescriptionRequest,
    PriceRequest,
    PhotoRequest,
    SkipPhotoButton,
    PreviewHeader,
    ConfirmButton,
    EditButton,
    CancelButton,
    AdCancelled,

    // Validation errors
    InvalidLink,
    InvalidPrice,
    InvalidPhoto,
    InvalidChoice,
    UsernameRequired,
    ErrorRestart,

    // Payment
    PaymentTitle,
    PaymentDescription,
    PaymentMessage,
    PaymentError,
    AdSubmitted,

    // Moderation outcomes (seller-facing)
    AdApproved,
    AdRejected,
    RejectionReasonLabel,
    RefundSuccessLine,
    RefundFailureLine,

    // Support flow
    SupportMessage,
    SupportSent,
    AdminResponseRequest,
    AdminResponseTitle,
    ResponseSent,
    ErrorSendingResponse,

    // Rate limiting
    AdCooldownActive,
    AdDailyLimitReached,
    SupportCooldownActive,
    SupportHourlyLimitReached,

    // My ads
    MyAdsHeader,
    MyAdsEmpty,
    MarkSoldButton,
    MarkAvailableButton,
    AdMarkedSold,
    AdMarkedAvailable,

    // Admin panels
    SupportAdminPanel,
    SuperAdminPanel,
    PendingAdsCount,
    PendingSupportCount,
    ViewPendingAds,
    ViewSupportRequests,
    ListUsersButton,
    SearchUserButton,
    StatisticsLabel,
    NoPendingAds,
    NoPendingSupport,

    // Admin actions
    ApproveButton,
    RejectButton,
    RejectWithRefundButton,
    RejectWithoutRefundButton,
    RespondButton,
    RejectionReasonPrompt,
    AdApprovedAdmin,
    AdRejectedAdmin,
    AlreadyDecided,

    // Admin errors and lookups
    NoPermission,
    AdNotFound,
    ErrorChannelSend,
    UserNotFound,
    InvalidUserId,
    EnterUserId,
    EnterChargeId,

    // Refund operations
    RefundUserButton,
    RefundChargeButton,
    RefundSweepButton,
    RefundIssued,
    RefundAlreadyDone,
    RefundNoCharge,
    RefundDeclined,
    NoMatchingCharge,
    RefundSweepSummary,

    // Statistics and user info
    TotalUsers,
    TotalAds,
    TotalSupportRequests,
    UserInfoHeader,
}

/// The `(fa, ru, en)` entry for a key.
pub fn entry(key: Key) -> (&'static str, &'static str, &'static str) {
    match key {
        Key::SelectLanguage => (
            "🌐 لطفاً زبان خود را انتخاب کنید:",
            "🌐 Пожалуйста, выберите ваш язык:",
            "🌐 Please select your language:",
        ),
        Key::LanguagePersian => ("🇮🇷 فارسی", "🇮🇷 Персидский", "🇮🇷 Persian"),
        Key::LanguageRussian => ("🇷🇺 روسی", "🇷🇺 Русский", "🇷🇺 Russian"),
        Key::LanguageEnglish => ("🇺🇸 انگلیسی", "🇺🇸 Английский", "🇺🇸 English"),
        Key::LanguageSelected => (
            "✅ زبان شما تنظیم شد!",
            "✅ Ваш язык установлен!",
            "✅ Your language has been set!",
        ),
        Key::WelcomeMessage => (
            "🎉 به ربات آگهی‌های گیفت خوش آمدید!\n\n📝 برای ثبت آگهی جدید، روی دکمه زیر کلیک کنید.",
            "🎉 Добро пожаловать в бот объявлений подарков!\n\n📝 Чтобы разместить новое объявление, нажмите кнопку ниже.",
            "🎉 Welcome to the Gift Ads Bot!\n\n📝 To post a new ad, click the button below.",
        ),
        Key::NewAdButton => (
            "📝 ثبت آگهی جدید",
            "📝 Разместить новое объявление",
            "📝 Post New Ad",
        ),
        Key::MyAdsButton => ("📋 آگهی‌های من", "📋 Мои объявления", "📋 My Ads"),
        Key::SupportButton => ("🆘 پشتیبانی", "🆘 Поддержка", "🆘 Support"),
        Key::BackToMenuButton => (
            "🔙 بازگشت به منو",
            "🔙 Вернуться в меню",
            "🔙 Back to Menu",
        ),
        Key::ChangeLanguageButton => (
            "🌐 تغییر زبان",
            "🌐 Изменить язык",
            "🌐 Change Language",
        ),
        Key::AdPostingGuide => (
            "📌 راهنمای ثبت آگهی گیفت\n\n✨ آگهی گیفت خود را تنها در چند مرحله ساده ثبت کنید:\n\n1️⃣ شروع ← روی دکمه \"ثبت آگهی\" کلیک کنید.\n2️⃣ ارسال لینک ← لینک گیفت یا محصول خود را ارسال کنید.\n3️⃣ تعیین قیمت ← قیمت را به تون وارد کنید (مثال: 50 تون).\n4️⃣ پرداخت ← ستاره پرداخت کنید تا آگهی فعال شود.\n5️⃣ تایید و انتشار ← پس از تایید ادمین، آگهی شما در کانال منتشر می‌شود. 🎉\n\n💡 نکته:\nبرای افزایش شانس فروش، می‌توانید همزمان محصول خود را در مارکت‌ های شخص ثالث نیز لیست کنید و اینجا هم آگهی ثبت کنید.\n\n✅ فقط لینک گیفت ارسال کنید.\n⚠️ آگهی‌های اسپم منجر به اخطار و در نهایت مسدودی از کانال می‌شود.",
            "📌 Руководство по размещению объявлений о подарках\n\n✨ Разместите свой подарок на продажу всего за несколько простых шагов:\n\n1️⃣ Начало ← Нажмите кнопку \"Разместить объявление\".\n2️⃣ Отправить ссылку ← Отправьте ссылку на ваш подарок или товар.\n3️⃣ Установить цену ← Введите цену в TON (пример: 50 TON).\n4️⃣ Оплата ← Заплатите звезды для активации объявления.\n5️⃣ Одобрение и публикация ← После одобрения администратором ваше объявление будет опубликовано в канале. 🎉\n\n💡 Совет:\nЧтобы увеличить шансы на продажу, вы можете одновременно разместить свой товар на сторонних торговых площадках и также разместить объявление здесь.\n\n✅ Отправляйте только ссылку на подарок.\n⚠️ Спам-объявления приведут к предупреждениям и в конечном итоге к бану с канала.",
            "📌 Gift Ad Posting Guide\n\n✨ Post your gift for sale in just a few simple steps:\n\n1️⃣ Start → Click on the \"Post Ad\" button.\n2️⃣ Send Link → Submit the link of your gift or product.\n3️⃣ Set Price → Enter the price in TON (example: 50 TON).\n4️⃣ Payment → Pay stars to activate your ad.\n5️⃣ Approval & Publish → After admin approval, your ad will be published in the channel. 🎉\n\n💡 Tip:\nTo increase your chances of selling, you can list your product on third-party marketplaces at the same time and also post an ad here.\n\n✅ Only send the gift link.\n⚠️ Spam ads will result in warnings and eventually a ban from the channel.",
        ),
        Key::GiftLinkRequest => (
            "🎁 لطفاً لینک گیفت خود را ارسال کنید:",
            "🎁 Пожалуйста, отправьте ссылку на ваш подарок:",
            "🎁 Please send your gift link:",
        ),
        Key::DescriptionRequest => (
            "📝 لطفاً توضیحات آگهی خود را ارسال کنید (یا بنویسید «بدون توضیح»):",
            "📝 Пожалуйста, отправьте описание вашего объявления (или напишите «без описания»):",
            "📝 Please send your ad description (or type \"no description\"):",
        ),
        Key::PriceRequest => (
            "💰 لطفاً قیمت آگهی خود را وارد کنید (به تون):",
            "💰 Пожалуйста, введите цену вашего объявления (в тонах):",
            "💰 Please enter your ad price (in TON):",
        ),
        Key::PhotoRequest => (
            "📸 لطفاً عکس کانال خود را ارسال کنید (یا رد شوید):",
            "📸 Пожалуйста, отправьте фото вашего канала (или пропустите):",
            "📸 Please send your channel photo (or skip):",
        ),
        Key::SkipPhotoButton => ("⏭ بدون عکس", "⏭ Без фото", "⏭ Skip Photo"),
        Key::PreviewHeader => (
            "👀 پیش‌نمایش آگهی شما:",
            "👀 Предпросмотр вашего объявления:",
            "👀 Preview of your ad:",
        ),
        Key::ConfirmButton => ("✅ تایید و پرداخت", "✅ Подтвердить и оплатить", "✅ Confirm & Pay"),
        Key::EditButton => ("✏️ ویرایش", "✏️ Редактировать", "✏️ Edit"),
        Key::CancelButton => ("❌ لغو", "❌ Отменить", "❌ Cancel"),
        Key::AdCancelled => (
            "❌ ثبت آگهی لغو شد.",
            "❌ Размещение объявления отменено.",
            "❌ Ad posting cancelled.",
        ),
        Key::InvalidLink => (
            "❌ لینک وارد شده معتبر نیست. لطفاً لینک صحیح گیفت ارسال کنید.",
            "❌ Введенная ссылка недействительна. Пожалуйста, отправьте правильную ссылку на подарок.",
            "❌ Invalid link entered. Please send a valid gift link.",
        ),
        Key::InvalidPrice => (
            "❌ قیمت وارد شده معتبر نیست. لطفاً یک عدد وارد کنید.",
            "❌ Введенная цена недействительна. Пожалуйста, введите число.",
            "❌ Invalid price entered. Please enter a number.",
        ),
        Key::InvalidPhoto => (
            "❌ لطفاً یک عکس ارسال کنید یا دکمه رد شدن را بزنید.",
            "❌ Пожалуйста, отправьте фото или нажмите кнопку пропуска.",
            "❌ Please send a photo or press the skip button.",
        ),
        Key::InvalidChoice => (
            "❌ لطفاً یکی از دکمه‌های زیر را انتخاب کنید.",
            "❌ Пожалуйста, выберите одну из кнопок ниже.",
            "❌ Please choose one of the buttons below.",
        ),
        Key::UsernameRequired => (
            "❌ برای ثبت آگهی باید حتماً یوزرنیم داشته باشید. لطفاً ابتدا یوزرنیم تنظیم کنید.",
            "❌ Для размещения объявления у вас обязательно должно быть имя пользователя. Пожалуйста, сначала установите имя пользователя.",
            "❌ You must have a username to post an ad. Please set a username first.",
        ),
        Key::ErrorRestart => (
            "❌ خطایی رخ داد. لطفاً دوباره شروع کنید.",
            "❌ Произошла ошибка. Пожалуйста, начните заново.",
            "❌ An error occurred. Please start again.",
        ),
        Key::PaymentTitle => ("پرداخت آگهی", "Оплата объявления", "Ad Payment"),
        Key::PaymentDescription => (
            "پرداخت {} ستاره برای انتشار آگهی",
            "Оплата {} звезд для публикации объявления",
            "Pay {} stars to publish your ad",
        ),
        Key::PaymentMessage => (
            "💳 برای تایید آگهی، لطفاً مبلغ {} ستاره پرداخت کنید:",
            "💳 Для подтверждения объявления, пожалуйста, оплатите {} звезд:",
            "💳 To confirm your ad, please pay {} stars:",
        ),
        Key::PaymentError => (
            "❌ خطا در پرداخت. لطفاً دوباره تلاش کنید.",
            "❌ Ошибка платежа. Пожалуйста, попробуйте еще раз.",
            "❌ Payment error. Please try again.",
        ),
        Key::AdSubmitted => (
            "✅ آگهی شما با موفقیت ثبت شد و برای بررسی ارسال شد.",
            "✅ Ваше объявление успешно отправлено на рассмотрение.",
            "✅ Your ad has been successfully submitted for review.",
        ),
        Key::AdApproved => (
            "🎉 آگهی شما تایید شد و در کانال منتشر شد!",
            "🎉 Ваше объявление одобрено и опубликовано в канале!",
            "🎉 Your ad has been approved and published in the channel!",
        ),
        Key::AdRejected => (
            "❌ متأسفانه آگهی شما رد شد.",
            "❌ К сожалению, ваше объявление было отклонено.",
            "❌ Unfortunately, your ad has been rejected.",
        ),
        Key::RejectionReasonLabel => ("📝 دلیل رد", "📝 Причина отклонения", "📝 Rejection reason"),
        Key::RefundSuccessLine => (
            "💰 استارز با موفقیت بازگردانده شد.",
            "💰 Звезды успешно возвращены.",
            "💰 Stars refunded successfully.",
        ),
        Key::RefundFailureLine => (
            "❌ خطا در بازگرداندن استارز.",
            "❌ Ошибка при возврате звезд.",
            "❌ Error refunding stars.",
        ),
        Key::SupportMessage => (
            "🆘 پشتیبانی\n\nلطفاً پیام خود را ارسال کنید:",
            "🆘 Поддержка\n\nПожалуйста, отправьте ваше сообщение:",
            "🆘 Support\n\nPlease send your message:",
        ),
        Key::SupportSent => (
            "✅ پیام شما برای پشتیبانی ارسال شد. به زودی پاسخ دریافت خواهید کرد.",
            "✅ Ваше сообщение отправлено в службу поддержки. Вы скоро получите ответ.",
            "✅ Your message has been sent to support. You will receive a response soon.",
        ),
        Key::AdminResponseRequest => (
            "💬 لطفاً پاسخ خود را وارد کنید:",
            "💬 Пожалуйста, введите ваш ответ:",
            "💬 Please enter your response:",
        ),
        Key::AdminResponseTitle => ("پاسخ پشتیبانی", "Ответ поддержки", "Support Response"),
        Key::ResponseSent => (
            "✅ پاسخ شما ارسال شد.",
            "✅ Ваш ответ отправлен.",
            "✅ Your response has been sent.",
        ),
        Key::ErrorSendingResponse => (
            "❌ خطا در ارسال پاسخ.",
            "❌ Ошибка отправки ответа.",
            "❌ Error sending response.",
        ),
        Key::AdCooldownActive => (
            "⏳ لطفاً {} ثانیه دیگر صبر کنید و دوباره تلاش کنید.",
            "⏳ Пожалуйста, подождите еще {} секунд и попробуйте снова.",
            "⏳ Please wait {} more seconds and try again.",
        ),
        Key::AdDailyLimitReached => (
            "🚫 شما به سقف روزانه ثبت آگهی رسیده‌اید. فردا دوباره تلاش کنید.",
            "🚫 Вы достигли дневного лимита объявлений. Попробуйте снова завтра.",
            "🚫 You have reached the daily ad limit. Try again tomorrow.",
        ),
        Key::SupportCooldownActive => (
            "⏳ لطفاً {} ثانیه دیگر صبر کنید و سپس پیام پشتیبانی ارسال کنید.",
            "⏳ Пожалуйста, подождите еще {} секунд, прежде чем отправить сообщение в поддержку.",
            "⏳ Please wait {} more seconds before sending another support message.",
        ),
        Key::SupportHourlyLimitReached => (
            "🚫 شما به سقف ساعتی پیام پشتیبانی رسیده‌اید. کمی بعد تلاش کنید.",
            "🚫 Вы достигли часового лимита сообщений в поддержку. Попробуйте позже.",
            "🚫 You have reached the hourly support limit. Try again later.",
        ),
        Key::MyAdsHeader => ("📋 آگهی‌های شما:", "📋 Ваши объявления:", "📋 Your ads:"),
        Key::MyAdsEmpty => (
            "📭 شما هنوز آگهی ثبت نکرده‌اید.",
            "📭 У вас пока нет объявлений.",
            "📭 You have no ads yet.",
        ),
        Key::MarkSoldButton => (
            "✅ علامت‌گذاری به عنوان فروخته شده",
            "✅ Отметить как проданное",
            "✅ Mark as Sold",
        ),
        Key::MarkAvailableButton => (
            "🔄 علامت‌گذاری به عنوان موجود",
            "🔄 Отметить как доступное",
            "🔄 Mark as Available",
        ),
        Key::AdMarkedSold => (
            "✅ آگهی به عنوان فروخته شده علامت‌گذاری شد.",
            "✅ Объявление отмечено как проданное.",
            "✅ Ad marked as sold.",
        ),
        Key::AdMarkedAvailable => (
            "🔄 آگهی به عنوان موجود علامت‌گذاری شد.",
            "🔄 Объявление отмечено как доступное.",
            "🔄 Ad marked as available.",
        ),
        Key::SupportAdminPanel => (
            "🔧 پنل ادمین پشتیبانی",
            "🔧 Панель администратора поддержки",
            "🔧 Support Admin Panel",
        ),
        Key::SuperAdminPanel => (
            "👑 پنل سوپر ادمین",
            "👑 Панель супер администратора",
            "👑 Super Admin Panel",
        ),
        Key::PendingAdsCount => (
            "آگهی‌های در انتظار",
            "Ожидающие объявления",
            "Pending Ads",
        ),
        Key::PendingSupportCount => (
            "درخواست‌های پشتیبانی",
            "Запросы поддержки",
            "Support Requests",
        ),
        Key::ViewPendingAds => (
            "📋 مشاهده آگهی‌های در انتظار",
            "📋 Просмотр ожидающих объявлений",
            "📋 View Pending Ads",
        ),
        Key::ViewSupportRequests => (
            "💬 مشاهده درخواست‌های پشتیبانی",
            "💬 Просмотр запросов поддержки",
            "💬 View Support Requests",
        ),
        Key::ListUsersButton => ("👥 لیست کاربران", "👥 Список пользователей", "👥 List Users"),
        Key::SearchUserButton => ("🔍 جستجوی کاربر", "🔍 Поиск пользователя", "🔍 Search User"),
        Key::StatisticsLabel => ("📊 آمار", "📊 Статистика", "📊 Statistics"),
        Key::NoPendingAds => (
            "📭 آگهی در انتظاری وجود ندارد.",
            "📭 Нет ожидающих объявлений.",
            "📭 No pending ads.",
        ),
        Key::NoPendingSupport => (
            "📭 درخواست پشتیبانی در انتظاری وجود ندارد.",
            "📭 Нет ожидающих запросов поддержки.",
            "📭 No pending support requests.",
        ),
        Key::ApproveButton => ("✅ تایید", "✅ Одобрить", "✅ Approve"),
        Key::RejectButton => ("❌ رد", "❌ Отклонить", "❌ Reject"),
        Key::RejectWithRefundButton => (
            "💰 رد با ریفاند",
            "💰 Отклонить с возвратом",
            "💰 Reject with Refund",
        ),
        Key::RejectWithoutRefundButton => (
            "❌ رد بدون ریفاند",
            "❌ Отклонить без возврата",
            "❌ Reject without Refund",
        ),
        Key::RespondButton => ("💬 پاسخ", "💬 Ответить", "💬 Respond"),
        Key::RejectionReasonPrompt => (
            "📝 لطفاً دلیل رد آگهی را وارد کنید:",
            "📝 Пожалуйста, введите причину отклонения объявления:",
            "📝 Please enter the rejection reason:",
        ),
        Key::AdApprovedAdmin => ("آگهی تایید شد.", "Объявление одобрено.", "Ad approved."),
        Key::AdRejectedAdmin => ("آگهی رد شد.", "Объявление отклонено.", "Ad rejected."),
        Key::AlreadyDecided => (
            "این آگهی قبلاً بررسی شده است.",
            "Это объявление уже рассмотрено.",
            "This ad has already been decided.",
        ),
        Key::NoPermission => (
            "شما مجاز به انجام این عمل نیستید.",
            "У вас нет разрешения на выполнение этого действия.",
            "You are not authorized to perform this action.",
        ),
        Key::AdNotFound => ("آگهی یافت نشد.", "Объявление не найдено.", "Ad not found."),
        Key::ErrorChannelSend => (
            "خطا در ارسال به کانال.",
            "Ошибка отправки в канал.",
            "Error sending to channel.",
        ),
        Key::UserNotFound => (
            "کاربر یافت نشد.",
            "Пользователь не найден.",
            "User not found.",
        ),
        Key::InvalidUserId => (
            "آیدی کاربر معتبر نیست.",
            "Недействительный ID пользователя.",
            "Invalid user ID.",
        ),
        Key::EnterUserId => (
            "🔍 لطفاً آیدی کاربر را وارد کنید:",
            "🔍 Пожалуйста, введите ID пользователя:",
            "🔍 Please enter user ID:",
        ),
        Key::EnterChargeId => (
            "🔍 لطفاً شناسه پرداخت را وارد کنید:",
            "🔍 Пожалуйста, введите идентификатор платежа:",
            "🔍 Please enter the payment charge ID:",
        ),
        Key::RefundUserButton => (
            "💰 ریفاند: کاربر",
            "💰 Возврат: пользователь",
            "💰 Refund: user",
        ),
        Key::RefundChargeButton => (
            "💰 ریفاند: پرداخت",
            "💰 Возврат: платеж",
            "💰 Refund: charge",
        ),
        Key::RefundSweepButton => (
            "💰 ریفاند: همه",
            "💰 Возврат: все",
            "💰 Refund: sweep",
        ),
        Key::RefundIssued => (
            "✅ ریفاند انجام شد.",
            "✅ Возврат выполнен.",
            "✅ Refund issued.",
        ),
        Key::RefundAlreadyDone => (
            "ℹ️ این پرداخت قبلاً ریفاند شده است.",
            "ℹ️ Этот платеж уже был возвращен.",
            "ℹ️ Charge was already refunded.",
        ),
        Key::RefundNoCharge => (
            "ℹ️ پرداختی برای این آگهی ثبت نشده است.",
            "ℹ️ Для этого объявления платеж не зарегистрирован.",
            "ℹ️ No charge recorded for this ad.",
        ),
        Key::RefundDeclined => (
            "❌ سرویس پرداخت ریفاند را رد کرد.",
            "❌ Платежная система отклонила возврат.",
            "❌ Provider declined the refund.",
        ),
        Key::NoMatchingCharge => (
            "ℹ️ پرداخت مطابقی یافت نشد.",
            "ℹ️ Подходящий оплаченный платеж не найден.",
            "ℹ️ No matching paid charge found.",
        ),
        Key::RefundSweepSummary => (
            "💰 ریفاند گروهی: {} از {} انجام شد، {} ناموفق.",
            "💰 Массовый возврат: выполнено {} из {}, не удалось {}.",
            "💰 Sweep: {} of {} refunded, {} failed.",
        ),
        Key::TotalUsers => ("👥 کل کاربران", "👥 Всего пользователей", "👥 Total Users"),
        Key::TotalAds => ("📝 کل آگهی‌ها", "📝 Всего объявлений", "📝 Total Ads"),
        Key::TotalSupportRequests => (
            "🆘 کل درخواست‌های پشتیبانی",
            "🆘 Всего запросов поддержки",
            "🆘 Total Support Requests",
        ),
        Key::UserInfoHeader => (
            "👤 اطلاعات کاربر",
            "👤 Информация о пользователе",
            "👤 User Information",
        ),
    }
}
